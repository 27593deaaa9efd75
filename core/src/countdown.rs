use chrono::{Duration, NaiveDateTime};

pub const TICK_MS: u32 = 1000;
pub const CELEBRATION_MS: i64 = 4200;
pub const COUNT_UP_MS: f64 = 1600.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountdownPhase {
    Counting,
    Celebrating,
    Settled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tick {
    pub remaining_secs: i64,
    pub just_reached: bool,
    pub phase: CountdownPhase,
}

/// Remaining-time tracker for one fixed target. Reaching the target is
/// reported by exactly one tick no matter how often `tick` runs afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Countdown {
    target: NaiveDateTime,
    reached_at: Option<NaiveDateTime>,
}

impl Countdown {
    pub fn new(target: NaiveDateTime) -> Self {
        Self {
            target,
            reached_at: None,
        }
    }

    pub fn target(&self) -> NaiveDateTime {
        self.target
    }

    pub fn is_reached(&self) -> bool {
        self.reached_at.is_some()
    }

    pub fn remaining_secs(&self, now: NaiveDateTime) -> i64 {
        (self.target - now).num_milliseconds().div_euclid(1000).max(0)
    }

    pub fn tick(&mut self, now: NaiveDateTime) -> Tick {
        let remaining_secs = self.remaining_secs(now);
        let just_reached = remaining_secs <= 0 && self.reached_at.is_none();
        if just_reached {
            self.reached_at = Some(now);
        }
        Tick {
            remaining_secs,
            just_reached,
            phase: self.phase(now),
        }
    }

    pub fn phase(&self, now: NaiveDateTime) -> CountdownPhase {
        match self.reached_at {
            None => CountdownPhase::Counting,
            Some(at) if now - at < Duration::milliseconds(CELEBRATION_MS) => {
                CountdownPhase::Celebrating
            }
            Some(_) => CountdownPhase::Settled,
        }
    }
}

pub fn format_remaining(secs: i64) -> String {
    let secs = secs.max(0);
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3600;
    let mins = (secs % 3600) / 60;
    let rest = secs % 60;
    if days > 0 {
        format!("{days}d {hours:02}h {mins:02}m")
    } else {
        format!("{hours:02}:{mins:02}:{rest:02}")
    }
}

/// Animated "days together" value: ease-out cubic from zero to `target`.
pub fn count_up(target: u32, elapsed_ms: f64, duration_ms: f64) -> u32 {
    if duration_ms <= 0.0 || elapsed_ms >= duration_ms {
        return target;
    }
    let t = (elapsed_ms / duration_ms).clamp(0.0, 1.0);
    let eased = 1.0 - (1.0 - t).powi(3);
    (f64::from(target) * eased).floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_days_then_clock() {
        assert_eq!(format_remaining(2 * 86_400 + 3 * 3600 + 4 * 60 + 5), "2d 03h 04m");
        assert_eq!(format_remaining(3 * 3600 + 4 * 60 + 5), "03:04:05");
        assert_eq!(format_remaining(-12), "00:00:00");
    }

    #[test]
    fn count_up_reaches_target_and_is_monotonic() {
        assert_eq!(count_up(500, 0.0, COUNT_UP_MS), 0);
        assert_eq!(count_up(500, COUNT_UP_MS, COUNT_UP_MS), 500);
        let mut last = 0;
        for step in 0..=16 {
            let value = count_up(500, f64::from(step) * 100.0, COUNT_UP_MS);
            assert!(value >= last);
            last = value;
        }
    }
}
