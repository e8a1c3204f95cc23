use super::*;

#[test]
fn scroll_ratio_clamps_and_maps_nan_to_start() {
    assert_eq!(ScrollRatio::new(-0.5).get(), 0.0);
    assert_eq!(ScrollRatio::new(1.5).get(), 1.0);
    assert_eq!(ScrollRatio::new(0.25).get(), 0.25);
    assert_eq!(ScrollRatio::new(f64::NAN), ScrollRatio::START);
    assert_eq!(ScrollRatio::new(f64::INFINITY), ScrollRatio::END);
    assert_eq!(ScrollRatio::new(f64::NEG_INFINITY), ScrollRatio::START);
}

#[test]
fn scroll_ratio_deserializes_through_clamp() {
    let r: ScrollRatio = serde_json::from_str("3.0").unwrap();
    assert_eq!(r, ScrollRatio::END);
}

#[test]
fn viewport_rejects_zero_dims() {
    assert!(Viewport::new(0, 10).is_err());
    assert!(Viewport::new(10, 0).is_err());
    let v = Viewport::new(767, 1000).unwrap();
    assert!(v.is_narrow(768));
    assert!(!Viewport::new(768, 1000).unwrap().is_narrow(768));
}

#[test]
fn frame_number_slot_and_clamp() {
    assert_eq!(FrameNumber(1).slot(), Some(0));
    assert_eq!(FrameNumber(0).slot(), None);
    assert_eq!(FrameNumber(0).clamp_to(240), FrameNumber(1));
    assert_eq!(FrameNumber(999).clamp_to(240), FrameNumber(240));
    assert_eq!(FrameNumber(5).clamp_to(0), FrameNumber(1));
    assert_eq!(FrameNumber(7).to_string(), "007");
}

#[test]
fn premul_rounds_half_up() {
    let c = Rgba8Premul::from_straight_rgba(255, 128, 0, 128);
    assert_eq!(c.to_array(), [128, 64, 0, 128]);
}
