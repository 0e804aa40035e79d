//! Shading integrators.
//!
//! Every integrator maps a primary ray to a radiance estimate against the
//! same traversal context: the scene's BVH, its point lights, and the
//! background color returned on a miss.

pub mod path;
pub mod textured;
pub mod volumetric;
pub mod whitted;

use candela_math::Vec3;

use crate::{Bvh, Light};

/// Offset applied to secondary ray origins along the surface normal.
pub(crate) const EPS_OFFSET: f32 = 1e-3;

/// Offset applied to shadow ray origins.
pub(crate) const EPS_SHADOW: f32 = 1e-4;

/// Shared state every integrator evaluates against.
pub struct RenderContext<'a> {
    pub bvh: &'a Bvh<'a>,
    pub lights: &'a [Light],
    pub background: Vec3,
}
