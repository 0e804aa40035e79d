//! Volumetric single scattering through a homogeneous sphere.
//!
//! The ray segment crossing the sphere is marched in equal steps sampled
//! at their midpoints. Each step attenuates the transmission by the
//! Beer-Lambert factor and gathers in-scattered light arriving from the
//! point light through the medium. Two compositing variants exist: the
//! forward march accumulates in-scatter weighted by the running
//! transmission, the backward march folds it into a running sum seeded
//! with the sphere's base color.

use candela_math::{Ray, Vec3};

use crate::{Light, Primitive, Sphere};

/// Which end of the segment the march starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarchDirection {
    /// Entrance to exit, in-scatter weighted by running transmission.
    Forward,
    /// Exit to entrance, in-scatter folded multiplicatively into a sum
    /// seeded with the sphere's base color.
    Backward,
}

/// Settings for the volumetric march.
#[derive(Debug, Clone, Copy)]
pub struct VolumeSettings {
    /// Absorption coefficient of the medium
    pub sigma_a: f32,
    /// Number of equal steps along the segment
    pub steps: u32,
    pub direction: MarchDirection,
}

impl Default for VolumeSettings {
    fn default() -> Self {
        Self {
            sigma_a: 0.45,
            steps: 10,
            direction: MarchDirection::Backward,
        }
    }
}

/// Beer-Lambert transmittance over a distance, clamped to [0, 1].
fn transfer(distance: f32, sigma_a: f32) -> f32 {
    (-distance * sigma_a).exp().clamp(0.0, 1.0)
}

/// In-scattered light reaching a point inside the medium.
///
/// A secondary ray is traced from the light toward the sample point; the
/// light transfer distance through the medium is measured from the
/// sphere's entry point and attenuated by Beer-Lambert.
fn light_intensity(
    sample_point: Vec3,
    sphere: &Sphere,
    light: &Light,
    step_size: f32,
    sigma_a: f32,
) -> Vec3 {
    let light_dir = (sample_point - light.position).normalize();
    let ray = Ray::new(light.position, light_dir);

    match sphere.intersect(&ray) {
        Some(hit) => {
            let entry_point = ray.position(hit.t);
            let light_transfer_distance = (sample_point - entry_point).length();
            light.color * step_size * transfer(light_transfer_distance, sigma_a)
        }
        None => Vec3::ZERO,
    }
}

/// March a camera ray through the sphere and composite over the background.
///
/// Returns the background unchanged when the ray misses the sphere.
pub fn march(
    sphere: &Sphere,
    light: &Light,
    ray: &Ray,
    background: Vec3,
    settings: &VolumeSettings,
) -> Vec3 {
    let Some((t0, t1)) = sphere.intersect_range(ray) else {
        return background;
    };

    let entrance = ray.position(t0);
    let exit = ray.position(t1);

    match settings.direction {
        MarchDirection::Forward => forward_march(entrance, exit, sphere, light, background, settings),
        MarchDirection::Backward => {
            backward_march(entrance, exit, sphere, light, background, settings)
        }
    }
}

fn forward_march(
    entrance: Vec3,
    exit: Vec3,
    sphere: &Sphere,
    light: &Light,
    background: Vec3,
    settings: &VolumeSettings,
) -> Vec3 {
    let steps = settings.steps;
    let mut result = Vec3::ZERO;
    let mut transmission = 1.0;

    let step_size = (exit - entrance).length() / steps as f32;
    let step_direction = (exit - entrance) / steps as f32;
    let mut current = entrance + step_direction * 0.5;

    // Beer's law attenuation per step
    let attenuation = transfer(step_size, settings.sigma_a);

    for _ in 0..steps {
        let in_scatter = light_intensity(current, sphere, light, step_size, settings.sigma_a);
        transmission *= attenuation;
        result += in_scatter * transmission;
        current += step_direction;
    }

    background * transmission + result
}

fn backward_march(
    entrance: Vec3,
    exit: Vec3,
    sphere: &Sphere,
    light: &Light,
    background: Vec3,
    settings: &VolumeSettings,
) -> Vec3 {
    let steps = settings.steps;
    let mut result = sphere.material().color;
    let mut transmission = 1.0;

    let step_size = (entrance - exit).length() / steps as f32;
    let step_direction = (entrance - exit) / steps as f32;
    let mut current = exit + step_direction * 0.5;

    let attenuation = transfer(step_size, settings.sigma_a);

    for _ in 0..steps {
        let in_scatter = light_intensity(current, sphere, light, step_size, settings.sigma_a);
        transmission *= attenuation;
        result = (result + in_scatter) * attenuation;
        current += step_direction;
    }

    background * transmission + result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Material;

    fn medium() -> Sphere {
        Sphere::new(
            Vec3::new(0.0, 0.0, -5.0),
            3.0,
            Material::matte(Vec3::ZERO),
        )
    }

    #[test]
    fn test_transfer_bounds() {
        assert_eq!(transfer(0.0, 0.45), 1.0);
        assert!(transfer(100.0, 0.45) < 1e-6);
        let d = transfer(2.0, 0.45);
        assert!((0.0..=1.0).contains(&d));
        assert!((d - (-0.9f32).exp()).abs() < 1e-6);
    }

    #[test]
    fn test_miss_returns_background() {
        let sphere = medium();
        let light = Light::new(Vec3::new(2.0, 2.0, -7.0), Vec3::ONE, 10.0);
        let background = Vec3::new(1.0, 0.0, 0.0);

        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        let color = march(&sphere, &light, &ray, background, &VolumeSettings::default());
        assert_eq!(color, background);
    }

    #[test]
    fn test_forward_extinction_through_center() {
        let sphere = medium();
        // Blue light: the red channel carries only transmitted background
        let light = Light::new(Vec3::new(2.0, 2.0, -7.0), Vec3::Z, 10.0);
        let background = Vec3::new(1.0, 0.0, 0.0);
        let settings = VolumeSettings {
            sigma_a: 0.45,
            steps: 10,
            direction: MarchDirection::Forward,
        };

        // Through the center: 6 units of medium
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let color = march(&sphere, &light, &ray, background, &settings);

        let expected_transmission = (-6.0f32 * 0.45).exp();
        assert!((color.x - expected_transmission).abs() < 1e-4);
        assert!(color.x < 0.0673);

        // In-scatter is bounded by |light.color| * N * step
        let step = 6.0 / 10.0;
        assert!(color.z <= 1.0 * 10.0 * step);
        assert!(color.z > 0.0);
    }

    #[test]
    fn test_backward_seeds_with_sphere_color() {
        let sphere = Sphere::new(
            Vec3::new(0.0, 0.0, -5.0),
            3.0,
            Material::matte(Vec3::new(0.0, 0.5, 0.0)),
        );
        // Light fully off to the side of the red channel
        let light = Light::new(Vec3::new(4.0, 4.0, -7.0), Vec3::new(1.3, 0.3, 0.9), 10.0);
        let background = Vec3::new(0.572, 0.772, 0.921);
        let settings = VolumeSettings {
            sigma_a: 0.45,
            steps: 10,
            direction: MarchDirection::Backward,
        };

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let color = march(&sphere, &light, &ray, background, &settings);

        // The base color is attenuated by the per-step factor N times
        let attenuation_total = (-6.0f32 * 0.45).exp();
        assert!(color.y >= 0.5 * attenuation_total + background.y * attenuation_total - 1e-4);
        // Still a finite, positive color
        assert!(color.min_element() >= 0.0);
        assert!(color.max_element() < 4.0);
    }

    #[test]
    fn test_forward_and_backward_differ() {
        let sphere = Sphere::new(
            Vec3::new(0.0, 0.0, -5.0),
            3.0,
            Material::matte(Vec3::new(0.2, 0.2, 0.2)),
        );
        let light = Light::new(Vec3::new(2.0, 2.0, -7.0), Vec3::ONE, 10.0);
        let background = Vec3::new(0.5, 0.5, 0.5);

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let forward = march(
            &sphere,
            &light,
            &ray,
            background,
            &VolumeSettings {
                direction: MarchDirection::Forward,
                ..VolumeSettings::default()
            },
        );
        let backward = march(
            &sphere,
            &light,
            &ray,
            background,
            &VolumeSettings {
                direction: MarchDirection::Backward,
                ..VolumeSettings::default()
            },
        );
        assert!(!forward.abs_diff_eq(backward, 1e-3));
    }

    #[test]
    fn test_zero_absorption_passes_background_through() {
        let sphere = medium();
        let light = Light::new(Vec3::new(2.0, 2.0, -7.0), Vec3::ZERO, 10.0);
        let background = Vec3::new(0.3, 0.6, 0.9);
        let settings = VolumeSettings {
            sigma_a: 0.0,
            steps: 10,
            direction: MarchDirection::Forward,
        };

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let color = march(&sphere, &light, &ray, background, &settings);
        assert!(color.abs_diff_eq(background, 1e-5));
    }
}
