//! Drop shadow and specular rim highlight.

use crate::foundation::core::{Rgba, Vec2};
use crate::foundation::math::{Vec3, normalize_vec2_or_zero, smoothstep};

/// Lens-space offset of the shadow circle from the lens center.
///
/// The light's screen projection is normalized, stretched by the aspect ratio like lens-space
/// x, and pushed `magnitude` away from the light.
pub fn shadow_offset(light_dir: Vec3, aspect: f64, magnitude: f64) -> Vec2 {
    let mut dir = normalize_vec2_or_zero(light_dir.xy());
    dir.x *= aspect;
    -dir * magnitude
}

/// Shadow blend weight at lens-space `p`, ramping over `softness` past the shadow circle.
pub fn shadow_amount(p: Vec2, offset: Vec2, radius: f64, softness: f64, intensity: f64) -> f64 {
    let dist = (p - offset).hypot() - radius;
    smoothstep(0.0, softness, dist) * intensity
}

/// Darken `bg` toward black by `amount`, keeping its alpha.
pub fn apply_shadow(bg: Rgba, amount: f64) -> Rgba {
    bg.mix(bg.shadow_of(), amount as f32)
}

/// Phong-style specular term `max(0, dot(reflect(-light, n), -view))^shininess`.
pub fn specular(normal: Vec3, light_dir: Vec3, view: Vec3, shininess: f64) -> f64 {
    let r = (-light_dir).reflect(normal);
    r.dot(-view).max(0.0).powf(shininess)
}

#[cfg(test)]
#[path = "../../tests/unit/optics/shading.rs"]
mod tests;
