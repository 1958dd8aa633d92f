use foundation::math::{Ray, Vec2, Vec3, WGS84_A};

/// Default eye distance from the globe center (meters).
const DEFAULT_DISTANCE: f64 = 3.0 * WGS84_A;

/// Pinhole perspective camera over a pixel viewport.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    /// Unit view direction.
    pub direction: Vec3,
    /// Approximate up; re-orthogonalized when building rays.
    pub up: Vec3,
    pub fov_y_rad: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl Camera {
    /// Camera at `eye` looking at `target`. Falls back to looking at the
    /// origin along -X when `eye == target`.
    pub fn looking_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let direction = (target - eye)
            .normalized()
            .unwrap_or(Vec3::new(-1.0, 0.0, 0.0));
        Self {
            eye,
            direction,
            up,
            fov_y_rad: 60f64.to_radians(),
            viewport_width: 1280.0,
            viewport_height: 720.0,
        }
    }

    /// Looks at the globe center from three Earth radii above lon 0, lat 0.
    pub fn default_for_viewport(width: f64, height: f64) -> Self {
        let mut camera = Self::looking_at(
            Vec3::new(DEFAULT_DISTANCE, 0.0, 0.0),
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, 1.0),
        );
        camera.set_viewport(width, height);
        camera
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport_width = width.max(1.0);
        self.viewport_height = height.max(1.0);
    }

    /// Ray from the eye through the pixel at `pos_px` (origin top-left, y down).
    ///
    /// Returns `None` for a degenerate basis (up parallel to direction).
    pub fn ray_through_pixel(&self, pos_px: Vec2) -> Option<Ray> {
        let forward = self.direction.normalized()?;
        let right = forward.cross(self.up).normalized()?;
        let true_up = right.cross(forward);

        let ndc_x = 2.0 * pos_px.x / self.viewport_width - 1.0;
        let ndc_y = 1.0 - 2.0 * pos_px.y / self.viewport_height;
        let tan_half = (0.5 * self.fov_y_rad).tan();
        let aspect = self.viewport_width / self.viewport_height;

        let dir = forward + right * (ndc_x * tan_half * aspect) + true_up * (ndc_y * tan_half);
        Some(Ray::new(self.eye, dir.normalized()?))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::default_for_viewport(1280.0, 720.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Camera;
    use foundation::math::{Vec2, Vec3};

    #[test]
    fn center_pixel_looks_along_direction() {
        let camera = Camera::default_for_viewport(1000.0, 800.0);
        let ray = camera.ray_through_pixel(Vec2::new(500.0, 400.0)).expect("ray");
        assert!((ray.dir - Vec3::new(-1.0, 0.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn pixels_right_of_center_turn_right() {
        let camera = Camera::default_for_viewport(1000.0, 800.0);
        let ray = camera.ray_through_pixel(Vec2::new(900.0, 400.0)).expect("ray");
        // Looking down -X with +Z up, screen-right is +Y.
        assert!(ray.dir.y > 0.0);
        assert!(ray.dir.z.abs() < 1e-12);
    }

    #[test]
    fn degenerate_up_yields_no_ray() {
        let camera = Camera::looking_at(
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, 1.0),
        );
        assert!(camera.ray_through_pixel(Vec2::new(0.0, 0.0)).is_none());
    }
}
