//! Lens-space coordinates and the beveled-disc normal field.

use std::f64::consts::FRAC_PI_2;

use crate::foundation::core::{Point, Vec2};
use crate::foundation::math::{Vec3, normalize_vec2_or_zero};

/// Normal of the flat lens interior, pointing at the viewer.
pub const FLAT_NORMAL: Vec3 = Vec3::new(0.0, 0.0, 1.0);

/// Aspect-corrected offset of `frag` from the lens center, in units of surface height.
pub fn lens_position(frag: Point, resolution: Vec2, center: Point) -> Vec2 {
    let uv = Vec2::new(frag.x / resolution.x, frag.y / resolution.y);
    let mut p = uv - center.to_vec2();
    p.x *= resolution.x / resolution.y;
    p
}

/// Progress across the bevel band: 0 at `inner_radius`, 1 at the rim and beyond.
///
/// A zero-width bevel jumps straight to 1.
pub fn bevel_progress(d: f64, inner_radius: f64, bevel_width: f64) -> f64 {
    if bevel_width > 0.0 {
        ((d - inner_radius) / bevel_width).clamp(0.0, 1.0)
    } else {
        1.0
    }
}

/// Surface normal at lens-space position `p` (with `d = |p|`).
///
/// Flat inside `inner_radius`; across the bevel the normal rotates along a quarter circle
/// from facing the viewer to tangent at the rim.
pub fn surface_normal(p: Vec2, d: f64, inner_radius: f64, bevel_width: f64) -> Vec3 {
    if d < inner_radius {
        return FLAT_NORMAL;
    }
    let angle = bevel_progress(d, inner_radius, bevel_width) * FRAC_PI_2;
    let xy = normalize_vec2_or_zero(p) * angle.sin();
    Vec3::from_xy(xy, angle.cos()).normalize_or_zero()
}

#[cfg(test)]
#[path = "../../tests/unit/optics/geometry.rs"]
mod tests;
