//! Wavefront OBJ file parser.
//!
//! This module provides line-by-line parsing of the OBJ subset the renderer
//! needs: vertex positions, texture coordinates, normals, and polygonal
//! faces. Faces of any arity are fan-triangulated.
//!
//! # Supported Syntax
//!
//! - `v x y z`
//! - `vt u v`
//! - `vn x y z`
//! - `f a/b/c d/e/f ...` (the middle index may be omitted: `a//c`)
//! - `#` comments and blank lines
//!
//! Indices are 1-based in the file and converted to 0-based internally.

use std::fs;
use std::path::Path;

use thiserror::Error;

/// Errors that can occur while loading an OBJ file.
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid face: {0}")]
    Face(String),
}

/// Result type for mesh loading operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Floats per interleaved vertex: position (3) + texcoord (2) + normal (3).
pub const FLOATS_PER_VERTEX: usize = 8;

/// Floats per triangle in the interleaved stream.
pub const FLOATS_PER_TRIANGLE: usize = 3 * FLOATS_PER_VERTEX;

/// A triangulated mesh as a flat interleaved vertex stream.
///
/// Each triangle contributes three vertices of
/// `(px, py, pz, u, v, nx, ny, nz)`, 24 floats total. Faces with more than
/// three vertices are emitted as a fan rooted at the first vertex.
#[derive(Clone, Debug, Default)]
pub struct ObjMesh {
    vertex_data: Vec<f32>,
}

impl ObjMesh {
    /// Load a mesh from an OBJ file on disk.
    pub fn load(path: impl AsRef<Path>) -> MeshResult<ObjMesh> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let mesh = Self::parse(&content)?;
        log::debug!(
            "Loaded mesh: {} ({} triangles)",
            path.display(),
            mesh.triangle_count()
        );
        Ok(mesh)
    }

    /// Parse a mesh from OBJ text.
    pub fn parse(content: &str) -> MeshResult<ObjMesh> {
        let mut parser = Parser::default();

        for (number, line) in content.lines().enumerate() {
            parser.line(number + 1, line)?;
        }

        Ok(ObjMesh {
            vertex_data: parser.into_vertex_data()?,
        })
    }

    /// The interleaved vertex stream, 24 floats per triangle.
    pub fn vertex_data(&self) -> &[f32] {
        &self.vertex_data
    }

    /// Number of triangles after fan triangulation.
    pub fn triangle_count(&self) -> usize {
        self.vertex_data.len() / FLOATS_PER_TRIANGLE
    }

    /// True if the file contained no usable faces.
    pub fn is_empty(&self) -> bool {
        self.vertex_data.is_empty()
    }
}

/// Per-corner index triple (position, texcoord, normal), -1 when absent.
type FaceIndex = [i32; 3];

#[derive(Default)]
struct Parser {
    positions: Vec<[f32; 3]>,
    texcoords: Vec<[f32; 2]>,
    normals: Vec<[f32; 3]>,
    faces: Vec<Vec<FaceIndex>>,
}

impl Parser {
    fn line(&mut self, number: usize, line: &str) -> MeshResult<()> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("v") => self.positions.push(parse_floats(number, tokens)?),
            Some("vt") => self.texcoords.push(parse_floats(number, tokens)?),
            Some("vn") => self.normals.push(parse_floats(number, tokens)?),
            Some("f") => {
                let face = tokens
                    .map(|group| parse_face_group(number, group))
                    .collect::<MeshResult<Vec<FaceIndex>>>()?;
                self.faces.push(face);
            }
            // Unrecognized records (o, g, s, mtllib, ...) are skipped
            _ => {}
        }
        Ok(())
    }

    /// Fan-triangulate every face and emit the interleaved stream.
    fn into_vertex_data(self) -> MeshResult<Vec<f32>> {
        let mut data = Vec::new();

        for face in &self.faces {
            for i in 1..face.len().saturating_sub(1) {
                for corner in [face[0], face[i], face[i + 1]] {
                    self.emit_corner(corner, &mut data)?;
                }
            }
        }

        Ok(data)
    }

    fn emit_corner(&self, corner: FaceIndex, data: &mut Vec<f32>) -> MeshResult<()> {
        let position = self.lookup(&self.positions, corner[0], "vertex")?;
        data.extend_from_slice(position);

        if corner[1] >= 0 {
            data.extend_from_slice(self.lookup(&self.texcoords, corner[1], "texcoord")?);
        } else {
            data.extend_from_slice(&[0.0, 0.0]);
        }

        if corner[2] >= 0 {
            data.extend_from_slice(self.lookup(&self.normals, corner[2], "normal")?);
        } else {
            data.extend_from_slice(&[0.0, 0.0, 0.0]);
        }
        Ok(())
    }

    fn lookup<'a, const N: usize>(
        &self,
        pool: &'a [[f32; N]],
        index: i32,
        kind: &str,
    ) -> MeshResult<&'a [f32; N]> {
        pool.get(index as usize)
            .ok_or_else(|| MeshError::Face(format!("references undefined {} {}", kind, index + 1)))
    }
}

/// Parse N whitespace-separated floats from the remainder of a record.
fn parse_floats<'a, const N: usize>(
    line: usize,
    mut tokens: impl Iterator<Item = &'a str>,
) -> MeshResult<[f32; N]> {
    let mut out = [0.0f32; N];
    for slot in out.iter_mut() {
        let token = tokens.next().ok_or_else(|| MeshError::Parse {
            line,
            message: "missing coordinate".to_string(),
        })?;
        *slot = token.parse().map_err(|_| MeshError::Parse {
            line,
            message: format!("invalid number '{}'", token),
        })?;
    }
    Ok(out)
}

/// Decompose a face corner `a/b/c` into 0-based (position, texcoord, normal).
///
/// Missing components are -1; `a//c` omits the texcoord.
fn parse_face_group(line: usize, group: &str) -> MeshResult<FaceIndex> {
    let mut indices: FaceIndex = [-1, -1, -1];

    for (slot, part) in group.split('/').take(3).enumerate() {
        if part.is_empty() {
            continue;
        }
        let index: i32 = part.parse().map_err(|_| MeshError::Parse {
            line,
            message: format!("invalid face index '{}'", part),
        })?;
        indices[slot] = index - 1;
    }

    if indices[0] < 0 {
        return Err(MeshError::Parse {
            line,
            message: format!("face corner '{}' has no vertex index", group),
        });
    }

    Ok(indices)
}
