//! Refraction, reflection and the Schlick reflectance weight.

use crate::foundation::math::Vec3;

/// Flip `normal` toward the viewer if needed and return it with `cos θᵢ = dot(-view, n)`.
pub fn facing_normal(normal: Vec3, view: Vec3) -> (Vec3, f64) {
    let cos_i = (-view).dot(normal);
    if cos_i < 0.0 {
        let flipped = -normal;
        (flipped, (-view).dot(flipped))
    } else {
        (normal, cos_i)
    }
}

/// Snell refraction of `view` through a surface with relative index `eta = n₁/n₂`.
///
/// Total internal reflection yields the zero vector; every other result is unit length.
pub fn refract(view: Vec3, normal: Vec3, cos_i: f64, eta: f64) -> Vec3 {
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        return Vec3::ZERO;
    }
    (view * eta + normal * (eta * cos_i - k.sqrt())).normalize_or_zero()
}

/// Mirror `view` about `normal`.
pub fn reflect(view: Vec3, normal: Vec3) -> Vec3 {
    view.reflect(normal)
}

/// Reflectance at normal incidence, `((1 - ior) / (1 + ior))²`.
pub fn normal_reflectance(ior: f64) -> f64 {
    let r = (1.0 - ior) / (1.0 + ior);
    r * r
}

/// Schlick's approximation: `R0 + (1 - R0)(1 - cos θᵢ)⁵`.
pub fn schlick(cos_i: f64, r0: f64) -> f64 {
    r0 + (1.0 - r0) * (1.0 - cos_i).powi(5)
}

#[cfg(test)]
#[path = "../../tests/unit/optics/fresnel.rs"]
mod tests;
