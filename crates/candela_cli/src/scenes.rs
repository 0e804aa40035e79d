//! Hard-coded demo scenes.
//!
//! Scene setup is an input to the renderer, not part of it: a 4x4 grid of
//! spheres over a ground plane for the surface renderers, and a single
//! homogeneous sphere with one light for the volumetric march.

use candela_math::Vec3;
use candela_renderer::{
    Camera, Light, Material, MaterialKind, Plane, Scene, Sphere,
    integrator::volumetric::MarchDirection,
};

const GRID_COLORS: [[f32; 3]; 16] = [
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 1.0, 0.0],
    [1.0, 0.0, 1.0],
    [0.0, 1.0, 1.0],
    [0.5, 0.5, 0.5],
    [1.0, 0.5, 0.0],
    [0.5, 0.0, 1.0],
    [0.0, 0.5, 1.0],
    [1.0, 0.5, 0.5],
    [0.5, 1.0, 0.5],
    [0.5, 0.5, 1.0],
    [1.0, 1.0, 1.0],
    [0.8, 0.8, 0.8],
    [0.3, 0.7, 0.4],
];

const GRID_RADII: [f32; 16] = [
    0.7, 0.8, 0.9, 1.0, 0.6, 0.9, 0.7, 0.8, 1.0, 0.6, 0.7, 0.8, 0.9, 1.0, 0.7, 0.8,
];

/// Material kinds cycle mirror / dielectric / matte across the grid.
fn grid_kind(index: usize) -> MaterialKind {
    match index % 3 {
        0 => MaterialKind::Mirror,
        1 => MaterialKind::Dielectric,
        _ => MaterialKind::Matte,
    }
}

/// The 4x4 sphere grid shared by the Whitted and path-traced scenes.
fn add_sphere_grid(scene: &mut Scene) {
    let spacing = 2.2;
    for i in 0..4 {
        for j in 0..4 {
            let index = i * 4 + j;
            let kind = grid_kind(index);
            let material = Material::new(
                Vec3::from_array(GRID_COLORS[index]),
                1.0,
                0.3,
                0.5,
                0.5,
                if kind == MaterialKind::Dielectric { 0.8 } else { 0.0 },
                1.5,
                32.0,
                kind,
            );
            let position = Vec3::new(
                -3.5 + j as f32 * spacing,
                -1.5,
                -8.0 + i as f32 * spacing,
            );
            scene.add(Sphere::new(position, GRID_RADII[index], material));
        }
    }
}

/// Sphere grid over a ground plane, one light, for the Whitted renderer.
pub fn whitted_scene(background: Vec3) -> Scene {
    let mut scene = Scene::new(Camera::new(Vec3::new(0.0, 0.0, 2.0), 90.0), background);
    add_sphere_grid(&mut scene);

    let ground = Material::new(
        Vec3::splat(0.5),
        1.0,
        0.3,
        0.5,
        0.5,
        0.0,
        1.0,
        16.0,
        MaterialKind::Matte,
    );
    scene.add(Plane::new(Vec3::new(0.0, 0.75, 0.0), 2.0, ground));

    scene.add_light(Light::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ONE, 2.0));
    scene
}

/// The same grid lit for the path tracer: brighter ground response and a
/// pair of strong overhead lights.
pub fn path_scene() -> Scene {
    let mut scene = Scene::new(Camera::new(Vec3::new(0.0, 0.0, 3.0), 90.0), Vec3::ZERO);
    add_sphere_grid(&mut scene);

    let ground = Material::new(
        Vec3::splat(0.5),
        1.0,
        1.0,
        1.0,
        1.0,
        0.0,
        1.0,
        16.0,
        MaterialKind::Matte,
    );
    scene.add(Plane::new(Vec3::new(0.0, 0.75, 0.0), 2.0, ground));

    scene.add_light(Light::new(Vec3::new(0.0, 10.0, 10.0), Vec3::ONE, 1000.0));
    scene.add_light(Light::new(Vec3::new(0.0, 10.0, -10.0), Vec3::ONE, 1000.0));
    scene
}

/// The volumetric scene: one participating sphere, one light, and the
/// per-variant background color.
pub fn volume_scene(direction: MarchDirection) -> (Sphere, Light, Vec3) {
    let sphere = Sphere::new(
        Vec3::new(0.0, 0.0, -5.0),
        3.0,
        Material::matte(Vec3::ZERO),
    );

    match direction {
        MarchDirection::Forward => (
            sphere,
            Light::new(Vec3::new(2.0, 2.0, -7.0), Vec3::ONE, 10.0),
            Vec3::new(1.0, 0.0, 0.0),
        ),
        MarchDirection::Backward => (
            sphere,
            Light::new(Vec3::new(4.0, 4.0, -7.0), Vec3::new(1.3, 0.3, 0.9), 10.0),
            Vec3::new(0.572, 0.772, 0.921),
        ),
    }
}

/// Camera used by the volumetric march.
pub fn volume_camera() -> Camera {
    Camera::new(Vec3::ZERO, 90.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitted_scene_contents() {
        let scene = whitted_scene(Vec3::ZERO);
        // 16 spheres and the ground plane
        assert_eq!(scene.primitives.len(), 17);
        assert_eq!(scene.lights.len(), 1);
    }

    #[test]
    fn test_grid_kinds_cycle() {
        assert_eq!(grid_kind(0), MaterialKind::Mirror);
        assert_eq!(grid_kind(1), MaterialKind::Dielectric);
        assert_eq!(grid_kind(2), MaterialKind::Matte);
        assert_eq!(grid_kind(15), MaterialKind::Mirror);
    }

    #[test]
    fn test_path_scene_has_two_lights() {
        let scene = path_scene();
        assert_eq!(scene.lights.len(), 2);
    }
}
