use super::*;

fn light() -> Vec3 {
    Vec3::new(0.5, 0.5, 1.0).normalize_or_zero()
}

#[test]
fn shadow_moves_away_from_the_light() {
    let off = shadow_offset(light(), 1.0, 0.04);
    let expected = -0.04 / 2f64.sqrt();
    assert!((off.x - expected).abs() < 1e-12);
    assert!((off.y - expected).abs() < 1e-12);

    let wide = shadow_offset(light(), 2.0, 0.04);
    assert!((wide.x - 2.0 * expected).abs() < 1e-12);
    assert!((wide.y - expected).abs() < 1e-12);
}

#[test]
fn shadow_ramps_with_distance_past_the_circle() {
    let off = Vec2::new(-0.03, -0.03);
    assert_eq!(shadow_amount(off, off, 0.15, 0.15, 1.0), 0.0);
    assert_eq!(shadow_amount(Vec2::new(0.5, 0.0), off, 0.15, 0.15, 0.5), 0.5);
    let mid = shadow_amount(Vec2::new(0.0, 0.0) + off + Vec2::new(0.225, 0.0), off, 0.15, 0.15, 1.0);
    assert!((mid - 0.5).abs() < 1e-9);
}

#[test]
fn full_shadow_is_black_with_original_alpha() {
    let bg = Rgba::new(0.3, 0.6, 0.9, 0.7);
    assert_eq!(apply_shadow(bg, 1.0), Rgba::new(0.0, 0.0, 0.0, 0.7));
    assert_eq!(apply_shadow(bg, 0.0), bg);
}

#[test]
fn specular_peaks_on_the_mirror_direction() {
    let view = Vec3::new(0.0, 0.0, -1.0);
    let flat = Vec3::new(0.0, 0.0, 1.0);
    let off_peak = specular(flat, light(), view, 200.0);
    assert!(off_peak < 1e-6);

    let half = (light() + Vec3::new(0.0, 0.0, 1.0)).normalize_or_zero();
    let peak = specular(half, light(), view, 200.0);
    assert!((peak - 1.0).abs() < 1e-9);
}
