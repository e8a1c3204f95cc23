use super::*;

#[test]
fn mul_div255_rounding_matches_reference() {
    assert_eq!(mul_div255_u16(255, 255), 255);
    assert_eq!(mul_div255_u16(0, 255), 0);
    assert_eq!(mul_div255_u16(128, 128), 64);
    assert_eq!(mul_div255_u8(200, 255), 200);
}

#[test]
fn progress_in_clamps_and_handles_degenerate_span() {
    assert_eq!(progress_in(0.1, 0.2, 0.4), 0.0);
    assert_eq!(progress_in(0.5, 0.2, 0.4), 1.0);
    assert!((progress_in(0.3, 0.2, 0.4) - 0.5).abs() < 1e-12);
    assert_eq!(progress_in(0.2, 0.2, 0.2), 1.0);
    assert_eq!(progress_in(0.1, 0.2, 0.2), 0.0);
}

#[test]
fn lerp_and_unit_weight() {
    assert_eq!(lerp(1.0, 240.0, 0.0), 1.0);
    assert_eq!(lerp(1.0, 240.0, 1.0), 240.0);
    assert_eq!(unit_to_u8(0.5), 128);
    assert_eq!(unit_to_u8(2.0), 255);
    assert_eq!(unit_to_u8(-1.0), 0);
}
