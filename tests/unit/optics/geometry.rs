use super::*;

#[test]
fn lens_position_is_aspect_corrected() {
    let res = Vec2::new(800.0, 400.0);
    let p = lens_position(Point::new(600.0, 200.0), res, Point::new(0.5, 0.5));
    assert_eq!(p, Vec2::new(0.5, 0.0));
    let q = lens_position(Point::new(400.0, 300.0), res, Point::new(0.5, 0.5));
    assert_eq!(q, Vec2::new(0.0, 0.25));
}

#[test]
fn interior_normal_is_exactly_flat() {
    for d in [0.0, 0.05, 0.1299] {
        let n = surface_normal(Vec2::new(d, 0.0), d, 0.13, 0.02);
        assert_eq!(n, FLAT_NORMAL);
    }
}

#[test]
fn bevel_normal_tilts_outward_and_stays_unit() {
    let mut last_z = 1.0;
    for i in 0..=10 {
        let d = 0.13 + 0.002 * f64::from(i);
        let n = surface_normal(Vec2::new(0.0, -d), d, 0.13, 0.02);
        assert!((n.length() - 1.0).abs() < 1e-12);
        assert!(n.y <= 0.0);
        assert!(n.z <= last_z + 1e-12);
        last_z = n.z;
    }
    assert!(last_z < 1e-6);
}

#[test]
fn zero_bevel_is_an_instant_transition() {
    let inside = surface_normal(Vec2::new(0.1499, 0.0), 0.1499, 0.15, 0.0);
    assert_eq!(inside, FLAT_NORMAL);
    let rim = surface_normal(Vec2::new(0.15, 0.0), 0.15, 0.15, 0.0);
    assert!(rim.x.is_finite() && rim.z.is_finite());
    assert!((rim.x - 1.0).abs() < 1e-12);
}

#[test]
fn degenerate_center_does_not_produce_nan() {
    let n = surface_normal(Vec2::ZERO, 0.0, 0.0, 0.2);
    assert_eq!(n, FLAT_NORMAL);
}
