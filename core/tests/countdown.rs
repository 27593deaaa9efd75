use chrono::{Duration, NaiveDate, NaiveDateTime};
use relwrapped_core::countdown::CELEBRATION_MS;
use relwrapped_core::{Countdown, CountdownPhase};

fn noon() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 9, 27)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .expect("valid time")
}

#[test]
fn reached_fires_exactly_once() {
    let target = noon();
    let mut countdown = Countdown::new(target);
    let mut fired = 0;
    for offset in -3..10 {
        let tick = countdown.tick(target + Duration::seconds(offset));
        if tick.just_reached {
            fired += 1;
            assert_eq!(offset, 0);
        }
    }
    assert_eq!(fired, 1);
    assert!(countdown.is_reached());
}

#[test]
fn late_first_tick_still_fires_once() {
    let target = noon();
    let mut countdown = Countdown::new(target);
    assert!(countdown.tick(target + Duration::hours(2)).just_reached);
    assert!(!countdown.tick(target + Duration::hours(3)).just_reached);
}

#[test]
fn celebration_settles_after_delay() {
    let target = noon();
    let mut countdown = Countdown::new(target);
    assert_eq!(countdown.tick(target - Duration::seconds(1)).phase, CountdownPhase::Counting);
    assert_eq!(countdown.tick(target).phase, CountdownPhase::Celebrating);
    let later = target + Duration::milliseconds(CELEBRATION_MS);
    assert_eq!(countdown.tick(later).phase, CountdownPhase::Settled);
}

#[test]
fn remaining_seconds_floor_and_clamp() {
    let target = noon();
    let countdown = Countdown::new(target);
    assert_eq!(countdown.remaining_secs(target - Duration::milliseconds(1500)), 1);
    assert_eq!(countdown.remaining_secs(target + Duration::seconds(5)), 0);
}
