//! Specular reflection and transmission kernels.
//!
//! Reference: "Chapter 9.3: Specular Reflection and Transmission",
//! https://pbr-book.org/4ed/Reflection_Models/Specular_Reflection_and_Transmission

use candela_math::Vec3;

/// Reflect an incident direction about a surface normal.
pub fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    let i = incident.normalize();
    let n = normal.normalize();
    (i - n * 2.0 * i.dot(n)).normalize()
}

/// Refract an incident direction through a surface with the given index of
/// refraction.
///
/// Returns the refracted direction and an `inside` flag telling the caller
/// the incident ray was traveling inside the medium; the secondary ray's
/// origin must be offset along `+normal` in that case and `-normal`
/// otherwise. Total internal reflection yields the zero vector.
pub fn refract(incident: Vec3, normal: Vec3, ior: f32) -> (Vec3, bool) {
    let i = incident.normalize();
    let mut n = normal.normalize();

    let mut cos_i = -i.dot(n);
    let mut eta = ior;
    let mut inside = false;

    // The ray is exiting the object
    if cos_i < 0.0 {
        n = -n;
        cos_i = -cos_i;
        eta = 1.0 / ior;
        inside = true;
    }

    let sin2_i = 1.0 - cos_i * cos_i;
    // Snell's law: eta = sin_i / sin_t
    let sin2_t = eta * eta * sin2_i;

    // Total internal reflection
    if sin2_t - 1.0 > 1e-6 {
        return (Vec3::ZERO, inside);
    }

    let cos_t = (1.0 - sin2_t).max(0.0).sqrt();
    (i / eta + n * (cos_i / eta - cos_t), inside)
}

/// Unpolarized Fresnel reflectance for the incident direction.
///
/// Returns 1.0 exactly under total internal reflection.
pub fn fresnel(incident: Vec3, normal: Vec3, ior: f32) -> f32 {
    let i = incident.normalize();
    let n = normal.normalize();

    let mut cos_i = (-i.dot(n)).clamp(-1.0, 1.0);
    let mut eta = ior;

    if cos_i < 0.0 {
        eta = 1.0 / ior;
        cos_i = -cos_i;
    }

    let sin2_i = 1.0 - cos_i * cos_i;
    let sin2_t = eta * eta * sin2_i;

    if sin2_t > 1.0 {
        return 1.0;
    }

    let cos_t = (1.0 - sin2_t).max(0.0).sqrt();

    let rs = (eta * cos_i - cos_t) / (eta * cos_i + cos_t);
    let rp = (cos_i - eta * cos_t) / (cos_i + eta * cos_t);

    (rs * rs + rp * rp) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect_is_involution() {
        let n = Vec3::new(0.3, 0.9, -0.2).normalize();
        let i = Vec3::new(0.5, -0.7, 0.4).normalize();

        let twice = reflect(reflect(i, n), n);
        assert!(twice.abs_diff_eq(i, 1e-5));
    }

    #[test]
    fn test_reflect_mirrors_about_normal() {
        let i = Vec3::new(1.0, -1.0, 0.0).normalize();
        let r = reflect(i, Vec3::Y);
        assert!(r.abs_diff_eq(Vec3::new(1.0, 1.0, 0.0).normalize(), 1e-5));
    }

    #[test]
    fn test_refract_straight_through_at_normal_incidence() {
        let (r, inside) = refract(-Vec3::Y, Vec3::Y, 1.5);
        assert!(!inside);
        assert!(r.abs_diff_eq(-Vec3::Y, 1e-5));
    }

    #[test]
    fn test_refract_is_unit_when_transmitted() {
        let i = Vec3::new(0.3, -1.0, 0.1).normalize();
        let (r, _) = refract(i, Vec3::Y, 1.5);
        assert_ne!(r, Vec3::ZERO);
        assert!((r.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_refract_total_internal_reflection() {
        // Grazing incidence: sin2_t = eta^2 * sin2_i > 1
        let i = Vec3::new(0.95, -(1.0f32 - 0.95 * 0.95).sqrt(), 0.0);
        let (r, inside) = refract(i, Vec3::Y, 1.5);
        assert_eq!(r, Vec3::ZERO);
        assert!(!inside);
    }

    #[test]
    fn test_refract_reports_inside_on_exit() {
        // Incident direction leaving the medium (along the normal)
        let (r, inside) = refract(Vec3::Y, Vec3::Y, 1.5);
        assert!(inside);
        assert!(r.abs_diff_eq(Vec3::Y, 1e-5));
    }

    #[test]
    fn test_fresnel_in_unit_interval() {
        for &(ix, iy) in &[(0.1, -1.0), (0.5, -0.5), (0.9, -0.1), (0.0, -1.0)] {
            let i = Vec3::new(ix, iy, 0.0).normalize();
            let kr = fresnel(i, Vec3::Y, 1.5);
            assert!((0.0..=1.0).contains(&kr), "kr = {}", kr);
        }
    }

    #[test]
    fn test_fresnel_grazing_is_total() {
        // cos_i ~ 0 forces the TIR branch: kr = 1 exactly
        let kr = fresnel(Vec3::X, Vec3::Y, 1.5);
        assert_eq!(kr, 1.0);
    }

    #[test]
    fn test_fresnel_matches_tir_of_refract() {
        for k in 0..32 {
            let x = k as f32 / 32.0;
            let i = Vec3::new(x, -(1.0f32 - x * x).sqrt(), 0.0);
            let (r, _) = refract(i, Vec3::Y, 1.5);
            let kr = fresnel(i, Vec3::Y, 1.5);
            if r == Vec3::ZERO {
                assert_eq!(kr, 1.0);
            } else {
                assert!(kr < 1.0);
            }
        }
    }
}
