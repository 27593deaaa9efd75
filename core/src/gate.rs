//! Cosmetic gates: the password on the long letter and the lock overlay that
//! hides the page until the anniversary. Neither is a security boundary; the
//! secrets are plain text shipped with the page.

use chrono::NaiveDateTime;

pub const LETTER_PASSWORD: &str = "092708";
pub const LETTER_ERROR_MS: u32 = 1800;
pub const UNLOCK_CODE: &str = "codezero";
pub const SHAKE_MS: u32 = 600;

pub const UNLOCKED_AFTER_TARGET: &str = "Unlocked — happy anniversary 💖";
pub const UNLOCKED_FOR_SESSION: &str =
    "Unlocked for this session — will re-lock on refresh until midnight";
pub const WRONG_CODE: &str = "Wrong code";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LetterGate {
    password: String,
    open: bool,
}

impl Default for LetterGate {
    fn default() -> Self {
        Self::new(LETTER_PASSWORD)
    }
}

impl LetterGate {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Compares the trimmed attempt with the password. Once open the letter
    /// stays open.
    pub fn try_open(&mut self, attempt: &str) -> bool {
        if attempt.trim() == self.password {
            self.open = true;
        }
        self.open
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnlockOutcome {
    /// Code accepted. `after_target` tells which confirmation to show.
    Unlocked { after_target: bool },
    Rejected,
}

impl UnlockOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            UnlockOutcome::Unlocked { after_target: true } => UNLOCKED_AFTER_TARGET,
            UnlockOutcome::Unlocked {
                after_target: false,
            } => UNLOCKED_FOR_SESSION,
            UnlockOutcome::Rejected => WRONG_CODE,
        }
    }
}

/// Overlay shown until `target`. Unlocking with the code only lasts for the
/// lifetime of this value, so a reload locks again.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LockGate {
    target: NaiveDateTime,
    unlocked: bool,
}

impl LockGate {
    pub fn new(target: NaiveDateTime) -> Self {
        Self {
            target,
            unlocked: false,
        }
    }

    pub fn target(&self) -> NaiveDateTime {
        self.target
    }

    pub fn is_locked(&self, now: NaiveDateTime) -> bool {
        !self.unlocked && now < self.target
    }

    pub fn remaining_secs(&self, now: NaiveDateTime) -> i64 {
        (self.target - now).num_seconds().max(0)
    }

    pub fn try_code(&mut self, attempt: &str, now: NaiveDateTime) -> UnlockOutcome {
        if attempt.trim().eq_ignore_ascii_case(UNLOCK_CODE) {
            self.unlocked = true;
            UnlockOutcome::Unlocked {
                after_target: now >= self.target,
            }
        } else {
            UnlockOutcome::Rejected
        }
    }
}

/// `HH:MM:SS` with hours allowed past 24.
pub fn format_clock(secs: i64) -> String {
    let secs = secs.max(0);
    format!(
        "{:02}:{:02}:{:02}",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, 27)
            .and_then(|d| d.and_hms_opt(h, m, s))
            .expect("valid time")
    }

    #[test]
    fn letter_password_is_trimmed() {
        let mut gate = LetterGate::default();
        assert!(!gate.try_open("0927"));
        assert!(gate.try_open("  092708 \n"));
        assert!(gate.is_open());
    }

    #[test]
    fn unlock_code_is_case_insensitive() {
        let midnight = NaiveDate::from_ymd_opt(2025, 9, 28)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid time");
        let mut gate = LockGate::new(midnight);
        assert!(gate.is_locked(at(23, 0, 0)));
        assert_eq!(gate.try_code("nope", at(23, 0, 0)), UnlockOutcome::Rejected);
        assert!(gate.is_locked(at(23, 0, 0)));
        let outcome = gate.try_code(" CodeZero ", at(23, 0, 0));
        assert_eq!(outcome.message(), UNLOCKED_FOR_SESSION);
        assert!(!gate.is_locked(at(23, 0, 1)));
    }

    #[test]
    fn lock_lifts_at_target() {
        let gate = LockGate::new(at(12, 0, 0));
        assert_eq!(gate.remaining_secs(at(11, 59, 30)), 30);
        assert!(!gate.is_locked(at(12, 0, 0)));
        assert_eq!(gate.remaining_secs(at(13, 0, 0)), 0);
    }

    #[test]
    fn clock_keeps_counting_hours() {
        assert_eq!(format_clock(0), "00:00:00");
        assert_eq!(format_clock(3661), "01:01:01");
        assert_eq!(format_clock(100 * 3600), "100:00:00");
        assert_eq!(format_clock(-5), "00:00:00");
    }
}
