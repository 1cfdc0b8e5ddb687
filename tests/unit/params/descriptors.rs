use super::*;

#[test]
fn descriptor_defaults_match_params_defaults() {
    let p = LensParams::default();
    for c in CONTROLS.iter() {
        assert_eq!(p.control(c.name), Some(c.default), "{}", c.name);
        assert!(c.min <= c.default && c.default <= c.max, "{}", c.name);
    }
}

#[test]
fn lookup_accepts_field_names_and_labels() {
    assert_eq!(ControlDescriptor::lookup("index_of_refraction"), Some(&INDEX_OF_REFRACTION));
    assert_eq!(ControlDescriptor::lookup("ior"), Some(&INDEX_OF_REFRACTION));
    assert_eq!(ControlDescriptor::lookup("Frosted"), Some(&FROSTED_BLUR_RADIUS));
    assert!(ControlDescriptor::lookup("gamma").is_none());
}

#[test]
fn set_control_clamps_to_slider_range() {
    let mut p = LensParams::default();
    p.set_control("ior", 5.0).unwrap();
    assert_eq!(p.index_of_refraction, 2.0);
    p.set_control("shadow", -1.0).unwrap();
    assert_eq!(p.shadow_intensity, 0.0);
    p.validate().unwrap();
}

#[test]
fn shrinking_radius_drags_bevel_along() {
    let mut p = LensParams::default();
    p.set_control("bevel_width", 0.1).unwrap();
    p.set_control("radius", 0.05).unwrap();
    assert_eq!(p.bevel_width, 0.05);
    p.validate().unwrap();
}

#[test]
fn set_control_rejects_unknown_and_non_finite() {
    let mut p = LensParams::default();
    assert!(p.set_control("gamma", 1.0).is_err());
    assert!(p.set_control("radius", f64::NAN).is_err());
    assert_eq!(p, LensParams::default());
}

#[test]
fn assignments_parse() {
    assert_eq!(
        parse_assignment(" thickness = 0.07 ").unwrap(),
        ("thickness".to_string(), 0.07)
    );
    assert!(parse_assignment("thickness").is_err());
    assert!(parse_assignment("thickness=abc").is_err());
}
