//! Primitive trait and hit records for ray-object intersection.

use candela_math::{Aabb, Ray, Vec3};

use crate::Material;

/// Record of a ray-primitive intersection.
///
/// `u` and `v` are the barycentric coordinates of the hit for triangles and
/// zero for everything else. Carrying them here keeps primitives immutable
/// during traversal, so a scene can be shared across render threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hit {
    /// Ray parameter where the intersection occurs
    pub t: f32,
    /// Barycentric weight of the second vertex
    pub u: f32,
    /// Barycentric weight of the third vertex
    pub v: f32,
}

impl Hit {
    /// A hit at parameter t with no barycentric data.
    pub fn at(t: f32) -> Self {
        Self { t, u: 0.0, v: 0.0 }
    }
}

/// Trait for objects that can be hit by rays and bounded for the BVH.
pub trait Primitive: Send + Sync {
    /// Test the ray against this primitive.
    ///
    /// Returns the nearest acceptable intersection, if any.
    fn intersect(&self, ray: &Ray) -> Option<Hit>;

    /// Unit shading normal at a hit point on the surface.
    fn normal_at(&self, point: Vec3, hit: &Hit) -> Vec3;

    /// Unit geometric (face) normal at a hit point.
    ///
    /// Equals the shading normal except for triangles with interpolated
    /// per-vertex normals.
    fn geometric_normal_at(&self, point: Vec3, hit: &Hit) -> Vec3 {
        self.normal_at(point, hit)
    }

    /// Interpolated texture coordinates at a hit, wrapped into [0, 1)².
    ///
    /// Only triangles carry texture coordinates; other primitives return
    /// zero.
    fn texcoord_at(&self, _hit: &Hit) -> Vec3 {
        Vec3::ZERO
    }

    /// Axis-aligned bounding box of this primitive.
    fn aabb(&self) -> Aabb;

    /// The surface material.
    fn material(&self) -> &Material;
}
