//! Candela Renderer - CPU ray tracing.
//!
//! An offline renderer built around a SAH bounding-volume hierarchy over
//! spheres, planes and triangles, with three shading modes: Whitted-style
//! recursion, one-bounce path tracing with multiple importance weighting,
//! and volumetric single scattering through a homogeneous sphere.

mod bvh;
mod camera;
mod film;
pub mod integrator;
mod light;
mod material;
mod optics;
mod plane;
mod primitive;
mod scene;
mod sphere;
mod triangle;

pub use bvh::{Bvh, PrimitiveHit};
pub use camera::Camera;
pub use film::{render, Film, Tile, Tonemap, TILE_SIZE};
pub use light::Light;
pub use material::{Material, MaterialKind};
pub use optics::{fresnel, reflect, refract};
pub use plane::Plane;
pub use primitive::{Hit, Primitive};
pub use scene::Scene;
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export the math types the public API is built on.
pub use candela_math::{Aabb, Ray, Vec3};

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;
