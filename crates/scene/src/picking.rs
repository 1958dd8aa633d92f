use foundation::math::{Ellipsoid, Ray, Vec2, Vec3};

use crate::camera::Camera;

/// Screen-to-world projection against a reference ellipsoid.
///
/// Terrain and scene geometry are ignored: the result is where the pointer
/// ray meets the idealized surface, or `None` when it misses.
pub trait SurfacePicker {
    fn pick_ellipsoid(&self, pos_px: Vec2, ellipsoid: &Ellipsoid) -> Option<Vec3>;
}

impl SurfacePicker for Camera {
    fn pick_ellipsoid(&self, pos_px: Vec2, ellipsoid: &Ellipsoid) -> Option<Vec3> {
        pick_screen(pos_px, |p| self.ray_through_pixel(p), ellipsoid)
    }
}

/// Screen picking wrapper.
///
/// The caller supplies a deterministic screen->ray mapping via `make_ray`.
pub fn pick_screen<F>(pos_px: Vec2, mut make_ray: F, ellipsoid: &Ellipsoid) -> Option<Vec3>
where
    F: FnMut(Vec2) -> Option<Ray>,
{
    let ray = make_ray(pos_px)?;
    ellipsoid.pick(&ray)
}
