//! Candela Core - Mesh and texture assets for the offline renderer.
//!
//! This crate provides:
//!
//! - **OBJ loading**: a minimal wavefront parser producing the interleaved
//!   vertex stream the renderer consumes
//! - **Textures**: 8-bit RGB images with bilinear sampling
//!
//! # Example
//!
//! ```ignore
//! use candela_core::{ObjMesh, Texture};
//!
//! let mesh = ObjMesh::load("barrel.obj")?;
//! let texture = Texture::load("barrel.png")?;
//! println!("{} triangles", mesh.triangle_count());
//! ```

pub mod obj;
pub mod texture;

// Re-export commonly used types
pub use obj::{MeshError, ObjMesh};
pub use texture::{Texture, TextureError};
