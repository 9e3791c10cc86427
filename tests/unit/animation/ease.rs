use super::*;

#[test]
fn out_cubic_endpoints() {
    assert_eq!(Ease::OutCubic.apply(0.0), 0.0);
    assert_eq!(Ease::OutCubic.apply(1.0), 1.0);
}

#[test]
fn out_cubic_is_monotonic_and_front_loaded() {
    let mut prev = Ease::OutCubic.apply(0.0);
    for i in 1..=200 {
        let t = f64::from(i) / 200.0;
        let v = Ease::OutCubic.apply(t);
        assert!(v >= prev, "not monotonic at t={t}");
        prev = v;
    }
    // Half the time covers most of the motion.
    assert!((Ease::OutCubic.apply(0.5) - 0.875).abs() < 1e-12);
}

#[test]
fn input_is_clamped() {
    for ease in [Ease::Linear, Ease::OutQuad, Ease::OutCubic, Ease::InOutCubic] {
        assert_eq!(ease.apply(-3.0), 0.0);
        assert_eq!(ease.apply(7.0), 1.0);
    }
}

#[test]
fn parses_names() {
    assert_eq!("out_cubic".parse::<Ease>().unwrap(), Ease::OutCubic);
    assert_eq!("Linear".parse::<Ease>().unwrap(), Ease::Linear);
    assert!("bounce".parse::<Ease>().is_err());
}
