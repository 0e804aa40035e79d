//! Triangle primitive.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection and
//! interpolates per-vertex normals and texture coordinates from the
//! barycentric coordinates of the hit.

use candela_math::{Aabb, Ray, Vec3};

use crate::{
    primitive::{Hit, Primitive},
    Material,
};

/// A triangle with per-vertex normals and texture coordinates.
#[derive(Debug, Clone)]
pub struct Triangle {
    p0: Vec3,
    p1: Vec3,
    p2: Vec3,
    /// Per-vertex shading normals (unit length)
    n0: Vec3,
    n1: Vec3,
    n2: Vec3,
    /// Per-vertex texture coordinates (z unused)
    st0: Vec3,
    st1: Vec3,
    st2: Vec3,
    material: Material,
    bbox: Aabb,
}

impl Triangle {
    /// Create a triangle; vertex normals are normalized on construction.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        p0: Vec3,
        p1: Vec3,
        p2: Vec3,
        n0: Vec3,
        n1: Vec3,
        n2: Vec3,
        st0: Vec3,
        st1: Vec3,
        st2: Vec3,
        material: Material,
    ) -> Self {
        let bbox = Aabb::from_points(p0.min(p1).min(p2), p0.max(p1).max(p2));

        Self {
            p0,
            p1,
            p2,
            n0: n0.normalize_or_zero(),
            n1: n1.normalize_or_zero(),
            n2: n2.normalize_or_zero(),
            st0,
            st1,
            st2,
            material,
            bbox,
        }
    }

    /// Create a flat-shaded triangle from positions only.
    pub fn flat(p0: Vec3, p1: Vec3, p2: Vec3, material: Material) -> Self {
        let n = (p1 - p0).cross(p2 - p0).normalize_or_zero();
        Self::new(
            p0,
            p1,
            p2,
            n,
            n,
            n,
            Vec3::ZERO,
            Vec3::ZERO,
            Vec3::ZERO,
            material,
        )
    }

    /// Build triangles from an interleaved vertex stream of
    /// `(px, py, pz, u, v, nx, ny, nz)` per vertex, 24 floats per triangle.
    pub fn from_vertex_data(data: &[f32], material: Material) -> Vec<Triangle> {
        data.chunks_exact(24)
            .map(|t| {
                let corner = |i: usize| {
                    let v = &t[i * 8..(i + 1) * 8];
                    (
                        Vec3::new(v[0], v[1], v[2]),
                        Vec3::new(v[3], v[4], 0.0),
                        Vec3::new(v[5], v[6], v[7]),
                    )
                };
                let (p0, st0, n0) = corner(0);
                let (p1, st1, n1) = corner(1);
                let (p2, st2, n2) = corner(2);
                Triangle::new(p0, p1, p2, n0, n1, n2, st0, st1, st2, material)
            })
            .collect()
    }
}

/// Wrap each component into [0, 1) by taking its fractional part.
fn wrap_around(v: Vec3) -> Vec3 {
    v - v.floor()
}

impl Primitive for Triangle {
    /// Möller-Trumbore ray-triangle intersection.
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let edge1 = self.p1 - self.p0;
        let edge2 = self.p2 - self.p0;

        let h = ray.direction.cross(edge2);
        let a = edge1.dot(h);

        // Ray parallel to the triangle plane (or degenerate triangle)
        if a.abs() < 1e-6 {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin - self.p0;
        let u = f * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction.dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(q);
        (t > 1e-6).then_some(Hit { t, u, v })
    }

    fn normal_at(&self, _point: Vec3, hit: &Hit) -> Vec3 {
        let w0 = 1.0 - hit.u - hit.v;
        (self.n0 * w0 + self.n1 * hit.u + self.n2 * hit.v).normalize()
    }

    fn geometric_normal_at(&self, _point: Vec3, _hit: &Hit) -> Vec3 {
        (self.p1 - self.p0).cross(self.p2 - self.p0).normalize()
    }

    fn texcoord_at(&self, hit: &Hit) -> Vec3 {
        let w0 = 1.0 - hit.u - hit.v;
        wrap_around(self.st0 * w0 + self.st1 * hit.u + self.st2 * hit.v)
    }

    fn aabb(&self) -> Aabb {
        self.bbox
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
