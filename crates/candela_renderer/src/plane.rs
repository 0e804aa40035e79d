//! Infinite plane primitive.

use candela_math::{Aabb, Ray, Vec3};

use crate::{
    primitive::{Hit, Primitive},
    Material,
};

/// An infinite plane satisfying `normal · p + d = 0`.
#[derive(Debug, Clone)]
pub struct Plane {
    normal: Vec3,
    d: f32,
    material: Material,
}

impl Plane {
    /// Create a plane from a (not necessarily unit) normal and offset.
    ///
    /// Both are rescaled together so the stored normal is unit length and
    /// the plane itself is unchanged.
    pub fn new(normal: Vec3, d: f32, material: Material) -> Self {
        let inv_len = 1.0 / normal.length();
        Self {
            normal: normal * inv_len,
            d: d * inv_len,
            material,
        }
    }
}

impl Primitive for Plane {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let denom = self.normal.dot(ray.direction);
        if denom.abs() < 1e-6 {
            return None;
        }
        let t = -(self.normal.dot(ray.origin) + self.d) / denom;
        (t >= 0.0).then(|| Hit::at(t))
    }

    fn normal_at(&self, _point: Vec3, _hit: &Hit) -> Vec3 {
        self.normal
    }

    fn aabb(&self) -> Aabb {
        // Unbounded: the whole space
        Aabb::new(Vec3::NEG_INFINITY, Vec3::INFINITY)
    }

    fn material(&self) -> &Material {
        &self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_hit() {
        // y = -1
        let plane = Plane::new(Vec3::Y, 1.0, Material::matte(Vec3::ONE));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, -1.0, 0.0));

        let hit = plane.intersect(&ray).unwrap();
        assert!((hit.t - 1.0).abs() < 1e-5);

        // The reported point satisfies the plane equation
        let p = ray.position(hit.t);
        assert!((plane.normal.dot(p) + plane.d).abs() < 1e-4);
    }

    #[test]
    fn test_plane_parallel_ray_misses() {
        let plane = Plane::new(Vec3::Y, 1.0, Material::matte(Vec3::ONE));
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert!(plane.intersect(&ray).is_none());
    }

    #[test]
    fn test_plane_behind_ray_misses() {
        let plane = Plane::new(Vec3::Y, 1.0, Material::matte(Vec3::ONE));
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert!(plane.intersect(&ray).is_none());
    }

    #[test]
    fn test_plane_scaled_normal_is_same_plane() {
        // 0.75y + 2 = 0 is the plane y = -8/3
        let plane = Plane::new(Vec3::new(0.0, 0.75, 0.0), 2.0, Material::matte(Vec3::ONE));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, -1.0, 0.0));

        let hit = plane.intersect(&ray).unwrap();
        assert!((hit.t - 8.0 / 3.0).abs() < 1e-4);
        assert!(plane.normal_at(ray.position(hit.t), &hit).abs_diff_eq(Vec3::Y, 1e-6));
    }

    #[test]
    fn test_plane_aabb_unbounded() {
        let plane = Plane::new(Vec3::Y, 1.0, Material::matte(Vec3::ONE));
        let bbox = plane.aabb();
        assert!(bbox.min.x.is_infinite() && bbox.max.x.is_infinite());
    }
}
