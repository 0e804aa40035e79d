// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod ray;

pub use aabb::Aabb;
pub use ray::Ray;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a * b, Vec3::new(4.0, 10.0, 18.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    }

    #[test]
    fn test_vec3_indexing() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v[0], 1.0);
        assert_eq!(v[1], 2.0);
        assert_eq!(v[2], 3.0);
    }

    #[test]
    #[should_panic]
    fn test_vec3_index_out_of_range() {
        let v = Vec3::ZERO;
        let _ = v[3];
    }

    #[test]
    fn test_vec3_tolerant_equality() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = a + Vec3::splat(1e-7);
        assert!(a.abs_diff_eq(b, 1e-6));
        assert!(!a.abs_diff_eq(a + Vec3::X * 1e-3, 1e-6));
    }
}
