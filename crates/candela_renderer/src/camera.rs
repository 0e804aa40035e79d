//! Pinhole camera for primary ray generation.

use candela_math::{Ray, Vec3};

/// A pinhole camera at a fixed position looking down -Z.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,
    /// Vertical field of view in degrees
    pub vfov: f32,
}

impl Camera {
    /// Create a camera at `position` with the given vertical field of view.
    pub fn new(position: Vec3, vfov: f32) -> Self {
        Self { position, vfov }
    }

    /// Generate the primary ray through the center of pixel (x, y).
    ///
    /// Pixel (0, 0) is the top-left corner; y grows downward.
    pub fn primary_ray(&self, x: u32, y: u32, width: u32, height: u32) -> Ray {
        let scale = (self.vfov.to_radians() / 2.0).tan();
        let aspect = width as f32 / height as f32;

        let px = (2.0 * (x as f32 + 0.5) / width as f32 - 1.0) * scale * aspect;
        let py = (1.0 - 2.0 * (y as f32 + 0.5) / height as f32) * scale;

        Ray::new(self.position, Vec3::new(px, py, -1.0))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 90.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, Primitive, Sphere};

    #[test]
    fn test_central_pixel_sees_sphere() {
        let camera = Camera::new(Vec3::ZERO, 90.0);
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -5.0), 2.0, Material::matte(Vec3::ONE));

        let ray = camera.primary_ray(32, 32, 65, 65);
        let hit = sphere.intersect(&ray).unwrap();
        assert!((hit.t - 3.0).abs() < 1e-3);
    }

    #[test]
    fn test_central_ray_looks_down_minus_z() {
        let camera = Camera::new(Vec3::ZERO, 90.0);
        // Odd resolution puts a pixel center exactly on the axis
        let ray = camera.primary_ray(32, 32, 65, 65);
        assert!(ray.direction.abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-6));
    }

    #[test]
    fn test_rays_are_symmetric_about_center() {
        let camera = Camera::new(Vec3::ZERO, 90.0);
        let left = camera.primary_ray(0, 32, 65, 65);
        let right = camera.primary_ray(64, 32, 65, 65);
        assert!((left.direction.x + right.direction.x).abs() < 1e-6);
        assert!((left.direction.y - right.direction.y).abs() < 1e-6);

        let top = camera.primary_ray(32, 0, 65, 65);
        let bottom = camera.primary_ray(32, 64, 65, 65);
        assert!((top.direction.y + bottom.direction.y).abs() < 1e-6);
    }

    #[test]
    fn test_y_grows_downward() {
        let camera = Camera::new(Vec3::ZERO, 90.0);
        let top = camera.primary_ray(0, 0, 64, 64);
        assert!(top.direction.y > 0.0);
        let bottom = camera.primary_ray(0, 63, 64, 64);
        assert!(bottom.direction.y < 0.0);
    }

    #[test]
    fn test_aspect_scales_horizontal_extent() {
        let camera = Camera::new(Vec3::ZERO, 90.0);
        let wide = camera.primary_ray(0, 0, 128, 64);
        let square = camera.primary_ray(0, 0, 64, 64);
        // Wider image, wider horizontal angle at the border
        assert!(wide.direction.x < square.direction.x);
        assert!(wide.direction.x.abs() > square.direction.x.abs());
    }
}
