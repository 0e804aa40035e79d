//! Whitted-style recursive ray tracing.

use candela_math::{Ray, Vec3};

use crate::{
    integrator::{RenderContext, EPS_OFFSET, EPS_SHADOW},
    optics::{fresnel, reflect, refract},
    MaterialKind,
};

/// Trace a ray and compute its radiance.
///
/// Mirrors spawn a single reflected ray, dielectrics combine a reflected
/// and a refracted ray with the Fresnel factor, and matte surfaces gather
/// diffuse and specular contributions from every unoccluded point light.
pub fn cast_ray(ctx: &RenderContext<'_>, ray: &Ray, depth: u32, max_bounces: u32) -> Vec3 {
    if depth > max_bounces {
        return ctx.background;
    }

    let Some(found) = ctx.bvh.nearest_hit(ray) else {
        return ctx.background;
    };

    let hit_point = ray.position(found.hit.t);
    let normal = found.primitive.normal_at(hit_point, &found.hit);
    let material = found.primitive.material();

    match material.kind {
        MaterialKind::Mirror => {
            let reflected = reflect(ray.direction, normal);
            let reflected_ray = Ray::new(hit_point + normal * EPS_OFFSET, reflected);
            cast_ray(ctx, &reflected_ray, depth + 1, max_bounces)
        }
        MaterialKind::Dielectric => {
            let reflected = reflect(ray.direction, normal);
            let reflected_ray = Ray::new(hit_point + normal * EPS_OFFSET, reflected);
            let reflected_color = cast_ray(ctx, &reflected_ray, depth + 1, max_bounces);

            let (refracted, inside) = refract(ray.direction, normal, material.ior);
            let refracted_color = if refracted != Vec3::ZERO {
                // Exiting rays restart just outside the surface, entering
                // rays just inside it
                let sign = if inside { 1.0 } else { -1.0 };
                let refracted_ray = Ray::new(hit_point + normal * sign * EPS_OFFSET, refracted);
                cast_ray(ctx, &refracted_ray, depth + 1, max_bounces)
            } else {
                Vec3::ZERO
            };

            let kr = fresnel(ray.direction, normal, material.ior);
            reflected_color * kr + refracted_color * (1.0 - kr)
        }
        MaterialKind::Matte => {
            let mut color = Vec3::ZERO;

            for light in ctx.lights {
                let to_light = light.position - hit_point;
                let light_distance2 = to_light.length_squared();
                let light_dir = to_light.normalize();

                let shadow_ray = Ray::new(hit_point + normal * EPS_SHADOW, light_dir);
                let in_shadow = ctx
                    .bvh
                    .nearest_hit(&shadow_ray)
                    .is_some_and(|s| s.hit.t * s.hit.t < light_distance2);
                if in_shadow {
                    continue;
                }

                let diffuse = material.color
                    * material.diffuse
                    * light.intensity
                    * normal.dot(light_dir).max(0.0);

                let view_reflected = reflect(ray.direction, normal);
                let specular = Vec3::ONE
                    * material.specular
                    * light.intensity
                    * view_reflected.dot(-light_dir).max(0.0).powf(material.shininess);

                color += diffuse + specular;
            }

            color
        }
    }
}
