//! One-bounce path tracing with multiple importance weighting.
//!
//! Direct lighting is estimated by sampling the point lights, indirect
//! lighting by uniform hemisphere sampling around the shading normal; the
//! two estimates are combined with balance-heuristic weights.

use std::f32::consts::PI;

use candela_math::{Ray, Vec3};
use rand::Rng;

use crate::integrator::{RenderContext, EPS_SHADOW};

/// Quality settings for the path integrator.
#[derive(Debug, Clone, Copy)]
pub struct PathSettings {
    /// Maximum recursion depth
    pub max_bounces: u32,
    /// Hemisphere samples per bounce
    pub num_samples: u32,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            max_bounces: 2,
            num_samples: 100,
        }
    }
}

/// Build an orthonormal tangent frame around the shading normal.
///
/// Returns `(tangent, bitangent)`; the tangent is chosen from the smaller
/// normal components to stay well-conditioned.
fn create_coordinate_system(n: Vec3) -> (Vec3, Vec3) {
    let tangent = if n.x.abs() > n.y.abs() {
        Vec3::new(n.z, 0.0, -n.x)
    } else {
        Vec3::new(0.0, -n.z, n.y)
    }
    .normalize();

    let bitangent = n.cross(tangent);
    (tangent, bitangent)
}

/// Map two uniform variates onto the hemisphere around +Y.
///
/// `r1` is the cosine of the polar angle, so the returned direction is
/// `(sin θ cos φ, r1, sin θ sin φ)`.
fn uniform_sample_hemisphere(r1: f32, r2: f32) -> Vec3 {
    let sin_theta = (1.0 - r1 * r1).sqrt();
    let phi = 2.0 * PI * r2;
    Vec3::new(sin_theta * phi.cos(), r1, sin_theta * phi.sin())
}

/// Trace a ray and estimate its radiance.
pub fn cast_ray(
    ctx: &RenderContext<'_>,
    ray: &Ray,
    depth: u32,
    settings: &PathSettings,
    rng: &mut impl Rng,
) -> Vec3 {
    if depth > settings.max_bounces {
        return ctx.background;
    }

    let Some(found) = ctx.bvh.nearest_hit(ray) else {
        return ctx.background;
    };

    let hit_point = ray.position(found.hit.t);
    let normal = found.primitive.normal_at(hit_point, &found.hit);
    let material = found.primitive.material();

    let brdf = material.color * material.diffuse / PI;
    let pdf_brdf = 1.0 / (2.0 * PI);

    // 1) Direct estimate: sample the point lights
    let mut direct = Vec3::ZERO;
    for light in ctx.lights {
        let to_light = light.position - hit_point;
        let dist2 = to_light.length_squared();
        let dist = dist2.sqrt();
        let wi = to_light / dist;

        let shadow_ray = Ray::new(hit_point + normal * EPS_SHADOW, wi);
        if ctx
            .bvh
            .nearest_hit(&shadow_ray)
            .is_some_and(|s| s.hit.t < dist)
        {
            continue;
        }

        let cos_theta = normal.dot(wi).max(0.0);
        let li = light.color * light.intensity / dist2;
        // pdf_light = 1 for a point light
        direct += brdf * li * cos_theta;
    }

    // 2) Indirect estimate: uniform hemisphere (BRDF) sampling
    let (tangent, bitangent) = create_coordinate_system(normal);
    let mut indirect_sum = Vec3::ZERO;
    for _ in 0..settings.num_samples {
        let r1 = rng.random::<f32>();
        let r2 = rng.random::<f32>();
        let sample = uniform_sample_hemisphere(r1, r2);
        let wi = (bitangent * sample.x + normal * sample.y + tangent * sample.z).normalize();
        let cos_theta = normal.dot(wi).max(0.0);

        let bounce = Ray::new(hit_point + wi * EPS_SHADOW, wi);
        let li = cast_ray(ctx, &bounce, depth + 1, settings, rng);
        indirect_sum += li * brdf * cos_theta / pdf_brdf;
    }
    let indirect = indirect_sum / settings.num_samples as f32;

    // 3) Balance-heuristic combination of the two estimators
    let pdf_light = 1.0;
    let w_light = pdf_light / (pdf_light + pdf_brdf);
    let w_brdf = pdf_brdf / (pdf_light + pdf_brdf);

    direct * w_light + indirect * w_brdf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Camera, Light, Material, Plane, Scene, Sphere};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_tangent_frame_is_orthonormal() {
        for n in [
            Vec3::Y,
            Vec3::X,
            Vec3::new(0.3, -0.8, 0.5).normalize(),
            Vec3::new(-0.7, 0.1, 0.7).normalize(),
        ] {
            let (t, b) = create_coordinate_system(n);
            assert!((t.length() - 1.0).abs() < 1e-5);
            assert!((b.length() - 1.0).abs() < 1e-5);
            assert!(t.dot(n).abs() < 1e-5);
            assert!(b.dot(n).abs() < 1e-5);
            assert!(t.dot(b).abs() < 1e-5);
        }
    }

    #[test]
    fn test_hemisphere_samples_stay_above_horizon() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..100 {
            let s = uniform_sample_hemisphere(rng.random(), rng.random());
            assert!(s.y >= 0.0);
            assert!((s.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_direct_only_matches_analytic_value() {
        // A lone matte plane, one light straight above the hit point, and
        // a black background: only the weighted direct term survives.
        let mut scene = Scene::new(Camera::new(Vec3::ZERO, 90.0), Vec3::ZERO);
        scene.add(Plane::new(Vec3::Y, 1.0, Material::matte(Vec3::ONE)));
        scene.add_light(Light::new(Vec3::new(0.0, 10.0, 0.0), Vec3::ONE, 100.0));
        let bvh = scene.build_bvh();
        let ctx = RenderContext {
            bvh: &bvh,
            lights: &scene.lights,
            background: scene.background,
        };

        let settings = PathSettings {
            max_bounces: 0,
            num_samples: 8,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, -1.0, 0.0));
        let color = cast_ray(&ctx, &ray, 0, &settings, &mut rng);

        // brdf * (I / d^2) * cos, weighted by pdf_light / (pdf_light + pdf_brdf)
        let brdf = 0.5 / PI;
        let pdf_brdf = 1.0 / (2.0 * PI);
        let expected = brdf * (100.0 / 121.0) * (1.0 / (1.0 + pdf_brdf));
        assert!(color.abs_diff_eq(Vec3::splat(expected), 1e-4));
    }

    #[test]
    fn test_occluded_light_contributes_nothing() {
        let mut scene = Scene::new(Camera::new(Vec3::ZERO, 90.0), Vec3::ZERO);
        scene.add(Plane::new(Vec3::Y, 2.0, Material::matte(Vec3::ONE)));
        scene.add(Sphere::new(
            Vec3::new(0.0, 0.0, -5.0),
            1.0,
            Material::matte(Vec3::ONE),
        ));
        scene.add_light(Light::new(Vec3::new(0.0, 10.0, -5.0), Vec3::ONE, 100.0));
        let bvh = scene.build_bvh();
        let ctx = RenderContext {
            bvh: &bvh,
            lights: &scene.lights,
            background: scene.background,
        };

        // Indirect sampling disabled by the zero-sample setting would skew
        // the estimate; keep one sample and a black background instead.
        let settings = PathSettings {
            max_bounces: 0,
            num_samples: 1,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, -2.0, -5.0));
        let color = cast_ray(&ctx, &ray, 0, &settings, &mut rng);
        assert_eq!(color, Vec3::ZERO);
    }

    #[test]
    fn test_deterministic_for_equal_seeds() {
        let mut scene = Scene::new(Camera::new(Vec3::ZERO, 90.0), Vec3::splat(0.2));
        scene.add(Sphere::new(
            Vec3::new(0.0, 0.0, -4.0),
            1.0,
            Material::matte(Vec3::new(0.8, 0.4, 0.2)),
        ));
        scene.add(Plane::new(Vec3::Y, 2.0, Material::matte(Vec3::splat(0.5))));
        scene.add_light(Light::new(Vec3::new(0.0, 8.0, 0.0), Vec3::ONE, 200.0));
        let bvh = scene.build_bvh();
        let ctx = RenderContext {
            bvh: &bvh,
            lights: &scene.lights,
            background: scene.background,
        };

        let settings = PathSettings {
            max_bounces: 1,
            num_samples: 4,
        };
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.1, -0.2, -1.0));

        let mut rng_a = ChaCha8Rng::seed_from_u64(99);
        let mut rng_b = ChaCha8Rng::seed_from_u64(99);
        let a = cast_ray(&ctx, &ray, 0, &settings, &mut rng_a);
        let b = cast_ray(&ctx, &ray, 0, &settings, &mut rng_b);
        assert_eq!(a, b);
    }
}
