use super::*;
use crate::foundation::core::Resolution;

fn params() -> LensParams {
    LensParams {
        resolution: Resolution {
            width: 400,
            height: 400,
        },
        chromatic_aberration_strength: 0.0,
        frosted_blur_radius: 0.0,
        ..LensParams::default()
    }
}

fn ramp(pos: Point) -> Rgba {
    Rgba::new(
        (pos.x / 400.0) as f32,
        (pos.y / 400.0) as f32,
        0.5,
        0.75,
    )
}

/// Pixel coordinate at lens-space offset `(dx, dy)` from the lens center of a square frame.
fn frag_at(p: &LensParams, dx: f64, dy: f64) -> Point {
    let w = f64::from(p.resolution.width);
    let h = f64::from(p.resolution.height);
    Point::new((p.center.x + dx * h / w) * w, (p.center.y + dy) * h)
}

#[test]
fn interior_is_flat_and_undistorted() {
    let p = params();
    let kernel = LensKernel::new(&p);
    for (dx, dy) in [(0.0, 0.0), (0.05, 0.0), (-0.04, 0.08), (0.0, -0.12)] {
        let frag = frag_at(&p, dx, dy);
        let s = kernel.surface(frag);
        assert!(s.d <= p.inner_radius());
        assert_eq!(s.normal, Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(s.distortion, 0.0);
        assert_eq!(s.refract_coord, frag);
        assert_eq!(s.cos_theta_i, 1.0);
        assert_eq!(s.fresnel, kernel.normal_reflectance());
    }
}

#[test]
fn bevel_band_distorts_and_reflects_more() {
    let p = params();
    let kernel = LensKernel::new(&p);
    let s = kernel.surface(frag_at(&p, 0.145, 0.0));
    assert!(s.distortion > 0.0 && s.distortion < 1.0);
    assert!(s.normal.x > 0.0);
    assert!(s.fresnel > kernel.normal_reflectance());
    assert!(s.refract_coord != s.frag);
    assert!(s.bevel_mask > 0.0);
}

#[test]
fn pixels_past_the_soft_edge_are_pure_backdrop() {
    let p = LensParams {
        shadow_intensity: 0.6,
        ..params()
    };
    let kernel = LensKernel::new(&p);
    for dx in [0.161, 0.2, 0.35] {
        let frag = frag_at(&p, dx, 0.0);
        let backdrop = kernel.backdrop(frag, kernel.lens_position(frag), &ramp);
        assert_eq!(kernel.compose(frag, &ramp), backdrop);
    }
}

#[test]
fn zero_bevel_stays_finite_everywhere() {
    let p = LensParams {
        bevel_width: 0.0,
        ..params()
    };
    let kernel = LensKernel::new(&p);
    for i in 0..200 {
        let dx = 0.14 + f64::from(i) * 0.0001;
        let c = kernel.compose(frag_at(&p, dx, 0.0), &ramp);
        assert!(c.r.is_finite() && c.g.is_finite() && c.b.is_finite() && c.a.is_finite());
    }
}

#[test]
fn bevel_wider_than_radius_does_not_fault() {
    let p = LensParams {
        radius: 0.1,
        bevel_width: 0.3,
        ..params()
    };
    let kernel = LensKernel::new(&p);
    let s = kernel.surface(frag_at(&p, 0.0, 0.0));
    assert_eq!(s.normal, Vec3::new(0.0, 0.0, 1.0));
    let c = kernel.compose(frag_at(&p, 0.05, 0.02), &ramp);
    assert!(c.r.is_finite() && c.a.is_finite());
}

#[test]
fn total_internal_reflection_samples_in_place() {
    // An index below 1 is outside the host contract but must still stay defined.
    let p = LensParams {
        index_of_refraction: 0.5,
        bevel_width: 0.05,
        ..params()
    };
    let kernel = LensKernel::new(&p);
    let s = kernel.surface(frag_at(&p, 0.148, 0.0));
    assert_eq!(s.refracted, Vec3::ZERO);
    assert_eq!(s.refract_coord, s.frag);
}

#[test]
fn grazing_rim_offsets_stay_finite() {
    let p = params();
    let kernel = LensKernel::new(&p);
    let s = kernel.surface(frag_at(&p, 0.1505, 0.0));
    assert!(s.normal.z < p.radius * 1e-3);
    assert!(s.refract_coord.x.is_finite() && s.refract_coord.y.is_finite());
    assert!(s.reflect_coord.x.is_finite() && s.reflect_coord.y.is_finite());
}

#[test]
fn highlight_only_brightens_color_channels() {
    let p = LensParams {
        highlight_strength: 2.0,
        thickness: 0.0,
        ..params()
    };
    let flat = LensParams {
        highlight_strength: 0.0,
        ..p
    };
    let solid = |_: Point| Rgba::new(0.2, 0.2, 0.2, 0.6);
    let lit = LensKernel::new(&p);
    let unlit = LensKernel::new(&flat);

    let mut brightened = false;
    for i in 0..=40 {
        let angle = f64::from(i) / 40.0 * std::f64::consts::TAU;
        let frag = frag_at(&p, 0.134 * angle.cos(), 0.134 * angle.sin());
        let a = lit.compose(frag, &solid);
        let b = unlit.compose(frag, &solid);
        assert_eq!(a.a, b.a);
        assert!(a.r >= b.r);
        brightened |= a.r > b.r + 1e-3;
    }
    assert!(brightened);
}

#[test]
fn aberration_is_invisible_where_rays_go_straight() {
    let p = params();
    let split = LensParams {
        chromatic_aberration_strength: 0.004,
        ..p
    };
    let frag = frag_at(&p, 0.03, -0.02);
    assert_eq!(
        LensKernel::new(&p).compose(frag, &ramp),
        LensKernel::new(&split).compose(frag, &ramp)
    );
}

#[test]
fn aberration_separates_channels_on_the_bevel() {
    let p = LensParams {
        chromatic_aberration_strength: 0.004,
        ..params()
    };
    let kernel = LensKernel::new(&p);
    let s = kernel.surface(frag_at(&p, 0.145, 0.0));
    let x_ramp = |pos: Point| {
        let v = (pos.x / 400.0) as f32;
        Rgba::new(v, v, v, 1.0)
    };
    let c = kernel.refraction_sample(&s, &x_ramp);
    assert!((c.r - c.b).abs() > 1e-4);
    assert_eq!(c.a, 1.0);
}

#[test]
fn free_function_matches_kernel() {
    let p = params();
    let frag = frag_at(&p, 0.12, 0.05);
    assert_eq!(compose(frag, &p, &ramp), LensKernel::new(&p).compose(frag, &ramp));
}

#[test]
fn huge_thickness_at_the_bevel_stays_defined() {
    let p = LensParams {
        thickness: 1e17,
        ..params()
    };
    let kernel = LensKernel::new(&p);
    let frag = frag_at(&p, 0.145, 0.0);
    let solid = crate::content::field::ImageField::solid(400, 400, Rgba::WHITE).unwrap();
    let c = kernel.compose(frag, &solid);
    assert!(c.r.is_finite() && c.a.is_finite());
    let c = kernel.compose(frag, &crate::content::field::Checkerboard::default());
    assert!(c.r.is_finite() && c.a.is_finite());
}
