use super::{Ray, Vec3, WGS84_A, WGS84_B};

/// Axis-aligned ellipsoid centered at the origin.
///
/// Used as the idealized globe surface for picking: no terrain, no
/// occluding geometry.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ellipsoid {
    pub radii: Vec3,
}

impl Ellipsoid {
    pub const WGS84: Ellipsoid = Ellipsoid {
        radii: Vec3 {
            x: WGS84_A,
            y: WGS84_A,
            z: WGS84_B,
        },
    };

    pub fn new(radii: Vec3) -> Self {
        Self { radii }
    }

    /// Parametric distance along `ray` to the first surface crossing at or
    /// after the ray origin.
    ///
    /// A ray starting inside the ellipsoid reports its exit point. Misses,
    /// degenerate directions and surfaces entirely behind the origin yield
    /// `None`.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f64> {
        // Scale into unit-sphere space; t is preserved by the linear map.
        let o = Vec3::new(
            ray.origin.x / self.radii.x,
            ray.origin.y / self.radii.y,
            ray.origin.z / self.radii.z,
        );
        let d = Vec3::new(
            ray.dir.x / self.radii.x,
            ray.dir.y / self.radii.y,
            ray.dir.z / self.radii.z,
        );

        let a = d.dot(d);
        if a <= 0.0 || !a.is_finite() {
            return None;
        }
        let b = 2.0 * o.dot(d);
        let c = o.dot(o) - 1.0;
        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            return None;
        }

        let sqrt_disc = disc.sqrt();
        let near = (-b - sqrt_disc) / (2.0 * a);
        let far = (-b + sqrt_disc) / (2.0 * a);
        if far < 0.0 {
            return None;
        }
        Some(if near >= 0.0 { near } else { far })
    }

    /// Surface point hit by `ray`, see [`Ellipsoid::intersect_ray`].
    pub fn pick(&self, ray: &Ray) -> Option<Vec3> {
        self.intersect_ray(ray).map(|t| ray.point_at(t))
    }

    /// Whether `p` lies on the surface within `eps` in scaled units.
    pub fn contains_surface_point(&self, p: Vec3, eps: f64) -> bool {
        let s = Vec3::new(p.x / self.radii.x, p.y / self.radii.y, p.z / self.radii.z);
        (s.dot(s) - 1.0).abs() <= eps
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::WGS84
    }
}
