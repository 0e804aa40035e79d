//! Sphere primitive.

use candela_math::{Aabb, Ray, Vec3};

use crate::{
    primitive::{Hit, Primitive},
    Material,
};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Material,
    bbox: Aabb,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        let rvec = Vec3::splat(radius);
        let bbox = Aabb::from_points(center - rvec, center + rvec);

        Self {
            center,
            radius,
            material,
            bbox,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Both intersection parameters of the ray with the sphere shell.
    ///
    /// Returns `(t_near, t_far)`; when the ray starts inside, `t_near` is
    /// clamped to `t_far` so both parameters are ahead of the origin. Used
    /// by the volumetric integrator to find the traversed segment.
    pub fn intersect_range(&self, ray: &Ray) -> Option<(f32, f32)> {
        let oc = ray.origin - self.center;
        let a = ray.direction.dot(ray.direction);
        let b = 2.0 * oc.dot(ray.direction);
        let c = oc.dot(oc) - self.radius * self.radius;
        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_d = discriminant.sqrt();
        let mut t_near = (-b - sqrt_d) / (2.0 * a);
        let t_far = (-b + sqrt_d) / (2.0 * a);
        if t_far < 0.0 {
            return None;
        }
        if t_near < 0.0 {
            t_near = t_far;
        }
        Some((t_near, t_far))
    }
}

impl Primitive for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let oc = ray.origin - self.center;
        let a = ray.direction.dot(ray.direction);
        let b = 2.0 * oc.dot(ray.direction);
        let c = oc.dot(oc) - self.radius * self.radius;
        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let t = (-b - discriminant.sqrt()) / (2.0 * a);
        (t >= 0.0).then(|| Hit::at(t))
    }

    fn normal_at(&self, point: Vec3, _hit: &Hit) -> Vec3 {
        (point - self.center).normalize()
    }

    fn aabb(&self) -> Aabb {
        self.bbox
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
