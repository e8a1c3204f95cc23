use super::*;

#[test]
fn ramp_holds_outside_domain() {
    let r = Ramp::new(&[(0.18, 0.0), (0.2, 1.0), (0.38, 1.0), (0.4, 0.0)]).unwrap();
    assert_eq!(r.sample(0.0), 0.0);
    assert_eq!(r.sample(1.0), 0.0);
    assert_eq!(r.sample(0.3), 1.0);
    assert_eq!(r.domain(), (0.18, 0.4));
}

#[test]
fn ramp_interpolates_linearly() {
    let r = Ramp::new(&[(0.0, 50.0), (1.0, -50.0)]).unwrap();
    assert!((r.sample(0.5) - 0.0).abs() < 1e-12);
    assert!((r.sample(0.25) - 25.0).abs() < 1e-12);
}

#[test]
fn ramp_hits_stop_values_exactly() {
    let r = Ramp::new(&[(0.18, 1.0), (0.2, 0.0)]).unwrap();
    assert_eq!(r.sample(0.18), 1.0);
    assert_eq!(r.sample(0.2), 0.0);
}

#[test]
fn ramp_rejects_bad_stops() {
    assert!(Ramp::new(&[]).is_err());
    assert!(Ramp::new(&[(0.5, 0.0), (0.2, 1.0)]).is_err());
    assert!(Ramp::new(&[(f64::NAN, 0.0)]).is_err());
}

#[test]
fn constant_ramp_is_flat() {
    let r = Ramp::constant(1.0);
    assert_eq!(r.sample(-1.0), 1.0);
    assert_eq!(r.sample(0.5), 1.0);
    assert_eq!(r.sample(2.0), 1.0);
}
