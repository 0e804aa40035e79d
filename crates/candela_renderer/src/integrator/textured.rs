//! Direct lighting for textured meshes.
//!
//! A single-pass (non-recursive) shader: the base color comes from a
//! bilinearly sampled texture at the hit's interpolated UVs, lit by an
//! ambient term plus Lambert diffuse and Blinn specular contributions from
//! every unoccluded light. Surfaces are treated as double-sided, so both
//! normals are flipped toward the viewer.

use candela_core::Texture;
use candela_math::{Ray, Vec3};

use crate::integrator::{RenderContext, EPS_SHADOW};

/// Shade a primary ray against a textured scene.
pub fn shade(ctx: &RenderContext<'_>, ray: &Ray, texture: Option<&Texture>) -> Vec3 {
    let Some(found) = ctx.bvh.nearest_hit(ray) else {
        return ctx.background;
    };

    let hit_point = ray.position(found.hit.t);
    let material = found.primitive.material();

    let mut shading_normal = found.primitive.normal_at(hit_point, &found.hit);
    let mut geometric_normal = found.primitive.geometric_normal_at(hit_point, &found.hit);

    // Double-sided shading: normals face the viewer
    if shading_normal.dot(ray.direction) > 1e-9 {
        shading_normal = -shading_normal;
    }
    if geometric_normal.dot(ray.direction) > 1e-9 {
        geometric_normal = -geometric_normal;
    }

    let base_color = match texture {
        Some(texture) => {
            let st = found.primitive.texcoord_at(&found.hit);
            texture.sample(st.x, st.y)
        }
        None => material.color,
    };

    // Ambient term
    let mut final_color = base_color * material.ambient;

    for light in ctx.lights {
        let to_light = light.position - hit_point;
        let light_distance = to_light.length();
        let light_dir = to_light / light_distance;

        let shadow_ray = Ray::new(hit_point + geometric_normal * EPS_SHADOW, light_dir);
        let in_shadow = ctx
            .bvh
            .nearest_hit(&shadow_ray)
            .is_some_and(|s| s.hit.t < light_distance);

        if in_shadow || geometric_normal.dot(light_dir) <= 0.0 {
            continue;
        }

        // Diffuse term
        let diffuse_intensity = shading_normal.dot(light_dir).max(0.0);
        let diffuse = base_color * material.diffuse * diffuse_intensity * light.intensity;

        // Blinn specular term
        let view_dir = -ray.direction;
        let halfway = (light_dir + view_dir).normalize();
        let spec_angle = shading_normal.dot(halfway).max(0.0);
        let specular =
            Vec3::ONE * material.specular * spec_angle.powf(material.shininess) * light.intensity;

        final_color += diffuse + specular;
    }

    final_color
}
