use std::cell::Cell;

use super::*;

fn gradient(pos: Point) -> Rgba {
    Rgba::new((pos.x / 100.0) as f32, (pos.y / 100.0) as f32, 0.25, 1.0)
}

#[test]
fn zero_radius_is_a_single_direct_read() {
    let calls = Cell::new(0u32);
    let counting = |pos: Point| {
        calls.set(calls.get() + 1);
        gradient(pos)
    };
    let pos = Point::new(10.5, 20.5);
    assert_eq!(frosted_sample(&counting, pos, 0.0, 12), gradient(pos));
    assert_eq!(frosted_sample(&counting, pos, -3.0, 12), gradient(pos));
    assert_eq!(calls.get(), 2);
}

#[test]
fn positive_radius_reads_the_full_grid() {
    let calls = Cell::new(0u32);
    let counting = |_: Point| {
        calls.set(calls.get() + 1);
        Rgba::WHITE
    };
    let _ = frosted_sample(&counting, Point::new(5.0, 5.0), 4.0, 12);
    assert_eq!(calls.get(), 25 * 25);
}

#[test]
fn box_blur_of_constant_field_is_constant() {
    let c = Rgba::new(0.25, 0.5, 0.75, 1.0);
    let solid = |_: Point| c;
    let out = frosted_sample(&solid, Point::new(3.0, 3.0), 6.0, 12);
    assert!(out.max_abs_diff(c) < 1e-6);
}

#[test]
fn box_blur_of_linear_ramp_keeps_the_center_value() {
    let out = frosted_sample(&gradient, Point::new(50.0, 40.0), 8.0, 4);
    assert!((out.r - 0.5).abs() < 1e-5);
    assert!((out.g - 0.4).abs() < 1e-5);
}

#[test]
fn dispersion_splits_channels_and_takes_green_alpha() {
    let field = |pos: Point| {
        let v = (pos.x / 100.0) as f32;
        Rgba::new(v, v, v, v)
    };
    let out = dispersed_sample(&field, Point::new(50.0, 0.0), Vec2::new(10.0, 0.0), 0.0, 12);
    assert!((out.r - 0.6).abs() < 1e-6);
    assert!((out.g - 0.5).abs() < 1e-6);
    assert!((out.b - 0.4).abs() < 1e-6);
    assert!((out.a - 0.5).abs() < 1e-6);
}

#[test]
fn dispersion_frosts_each_channel_at_its_own_offset() {
    // Curved in x so a blurred read differs from a point read.
    let field = |pos: Point| {
        let x = (pos.x / 100.0) as f32;
        Rgba::new(x * x, 0.5 * x * x, 1.0 - x * x, (pos.y / 100.0) as f32)
    };
    let pos = Point::new(40.0, 30.0);
    let split = Vec2::new(7.0, -3.0);
    let radius = 5.0;

    let out = dispersed_sample(&field, pos, split, radius, 4);
    let red = frosted_sample(&field, pos + split, radius, 4);
    let green = frosted_sample(&field, pos, radius, 4);
    let blue = frosted_sample(&field, pos - split, radius, 4);
    assert_eq!(out, Rgba::new(red.r, green.g, blue.b, green.a));
    assert_ne!(green, field(pos));
}
