//! Surface material description.

use candela_math::Vec3;

/// How the shading integrators treat a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialKind {
    /// Diffuse/specular surface lit directly by the point lights.
    Matte,
    /// Perfect mirror: the ray is reflected and traced on.
    Mirror,
    /// Glass-like surface combining reflection and refraction by Fresnel.
    Dielectric,
}

/// Bundle of shading coefficients shared by every primitive.
///
/// Owned by the primitive it is attached to and read-only while rendering.
#[derive(Debug, Clone, Copy)]
pub struct Material {
    /// Base color (RGB, 0-1)
    pub color: Vec3,
    /// Albedo factor
    pub albedo: f32,
    /// Ambient coefficient
    pub ambient: f32,
    /// Diffuse coefficient
    pub diffuse: f32,
    /// Specular coefficient
    pub specular: f32,
    /// Transparency coefficient
    pub transparency: f32,
    /// Index of refraction
    pub ior: f32,
    /// Shininess exponent for the specular lobe
    pub shininess: f32,
    pub kind: MaterialKind,
}

impl Material {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        color: Vec3,
        albedo: f32,
        ambient: f32,
        diffuse: f32,
        specular: f32,
        transparency: f32,
        ior: f32,
        shininess: f32,
        kind: MaterialKind,
    ) -> Self {
        Self {
            color,
            albedo,
            ambient,
            diffuse,
            specular,
            transparency,
            ior,
            shininess,
            kind,
        }
    }

    /// A matte surface with the given base color and standard coefficients.
    pub fn matte(color: Vec3) -> Self {
        Self {
            color,
            kind: MaterialKind::Matte,
            ..Self::default()
        }
    }

    /// A perfect mirror.
    pub fn mirror(color: Vec3) -> Self {
        Self {
            color,
            kind: MaterialKind::Mirror,
            ..Self::default()
        }
    }

    /// A dielectric with the given index of refraction.
    pub fn dielectric(color: Vec3, ior: f32) -> Self {
        Self {
            color,
            transparency: 0.8,
            ior,
            kind: MaterialKind::Dielectric,
            ..Self::default()
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            albedo: 1.0,
            ambient: 0.3,
            diffuse: 0.5,
            specular: 0.5,
            transparency: 0.0,
            ior: 1.5,
            shininess: 32.0,
            kind: MaterialKind::Matte,
        }
    }
}
