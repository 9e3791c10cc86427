use super::*;

#[test]
fn fixed_step_starts_at_zero_and_steps_by_period() {
    let mut clock = FixedStepClock::new(Fps::new(30, 1).unwrap());
    assert_eq!(clock.next_frame(), Duration::ZERO);
    assert_eq!(clock.next_frame(), Duration::from_nanos(33_333_333));
    for _ in 2..180 {
        clock.next_frame();
    }
    // Frame 180 lands exactly on six seconds, without accumulated drift.
    assert_eq!(clock.next_frame(), Duration::from_secs(6));
}

#[test]
fn fixed_step_handles_rational_rates() {
    let mut clock = FixedStepClock::new(Fps::new(30000, 1001).unwrap());
    clock.next_frame();
    assert_eq!(clock.next_frame(), Duration::from_nanos(33_366_666));
}

#[test]
fn wall_clock_is_monotonic_and_paced() {
    let mut clock = WallClock::new(Fps::new(200, 1).unwrap());
    assert_eq!(clock.next_frame(), Duration::ZERO);
    let a = clock.next_frame();
    let b = clock.next_frame();
    assert!(a >= Duration::from_millis(4));
    assert!(b > a);
}
