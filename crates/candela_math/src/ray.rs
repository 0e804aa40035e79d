use crate::Vec3;

/// A ray in 3D space with origin and direction.
///
/// The direction is normalized at construction, so `t` parameters returned
/// by intersection routines are world-space distances.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray. The direction is normalized.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn position(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
