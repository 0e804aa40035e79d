//! Scene container: primitives, lights, camera, background.

use candela_math::Vec3;

use crate::{Bvh, Camera, Light, Primitive};

/// A renderable scene.
///
/// The scene owns its primitives and lights; everything is immutable once
/// rendering starts, so it can be shared freely between render threads.
pub struct Scene {
    pub primitives: Vec<Box<dyn Primitive>>,
    pub lights: Vec<Light>,
    pub camera: Camera,
    pub background: Vec3,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(camera: Camera, background: Vec3) -> Self {
        Self {
            primitives: Vec::new(),
            lights: Vec::new(),
            camera,
            background,
        }
    }

    /// Add a primitive to the scene.
    pub fn add(&mut self, primitive: impl Primitive + 'static) {
        self.primitives.push(Box::new(primitive));
    }

    /// Add a point light to the scene.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Build the acceleration structure over the scene's primitives.
    pub fn build_bvh(&self) -> Bvh<'_> {
        Bvh::build(self.primitives.iter().map(|p| p.as_ref()))
    }
}
