//! Anniversary date arithmetic: days together, the next monthiversary, the
//! next unreached milestone, and which of the two comes first.
//!
//! All instants are local wall-clock times. Callers convert the browser clock
//! to a `NaiveDateTime` once and pass it in, so every function here is pure.

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};

/// Upper bound on months searched ahead (about a century).
pub const MONTHIVERSARY_SEARCH_LIMIT: u32 = 1200;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Monthiversary,
    Milestone(u32),
}

impl EventKind {
    pub fn label(self) -> &'static str {
        match self {
            EventKind::Monthiversary => "monthiversary",
            EventKind::Milestone(_) => "milestone",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledEvent {
    pub kind: EventKind,
    pub target: NaiveDateTime,
    pub days_away: u32,
    pub remaining: Duration,
}

impl ScheduledEvent {
    pub fn remaining_at(&self, now: NaiveDateTime) -> Duration {
        self.target - now
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Monthiversary {
    pub target: NaiveDateTime,
    pub months_ahead: u32,
    pub days_away: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Milestone {
    pub days: u32,
    pub target: NaiveDateTime,
    pub days_away: u32,
}

/// Everything the header widgets need for one anniversary at one instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outlook {
    pub anniversary: NaiveDate,
    pub days_together: u32,
    pub monthiversary: Option<Monthiversary>,
    pub milestone: Option<Milestone>,
    pub next: Option<ScheduledEvent>,
}

pub fn parse_anniversary(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(stamp.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|stamp| stamp.date())
}

pub fn local_midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Adds calendar months, clamping the day to the end of shorter months
/// (Jan 31 + 1 month is Feb 28/29, never Mar 1).
pub fn add_months_clamped(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

pub fn days_together(anniversary: NaiveDate, now: NaiveDateTime) -> u32 {
    calendar_days_between(anniversary, now.date())
}

fn calendar_days_between(from: NaiveDate, to: NaiveDate) -> u32 {
    let days = (to - from).num_days().max(0);
    u32::try_from(days).unwrap_or(u32::MAX)
}

/// First monthly recurrence of `anniversary` strictly after `now`, or `None`
/// when nothing is found within [`MONTHIVERSARY_SEARCH_LIMIT`] months.
pub fn next_monthiversary(anniversary: NaiveDate, now: NaiveDateTime) -> Option<Monthiversary> {
    (0..MONTHIVERSARY_SEARCH_LIMIT).find_map(|months_ahead| {
        let date = add_months_clamped(anniversary, months_ahead)?;
        let target = local_midnight(date);
        (target > now).then(|| Monthiversary {
            target,
            months_ahead,
            days_away: calendar_days_between(now.date(), date),
        })
    })
}

/// Smallest milestone strictly greater than `days_together`.
pub fn next_milestone(milestones: &[u32], days_together: u32) -> Option<u32> {
    milestones
        .iter()
        .copied()
        .filter(|days| *days > days_together)
        .min()
}

fn milestone_for(anniversary: NaiveDate, milestones: &[u32], days_together: u32) -> Option<Milestone> {
    let days = next_milestone(milestones, days_together)?;
    let date = anniversary.checked_add_signed(Duration::days(i64::from(days)))?;
    Some(Milestone {
        days,
        target: local_midnight(date),
        days_away: days - days_together,
    })
}

/// Picks whichever event is closer in days. Ties go to the milestone.
pub fn select_next_event(
    monthiversary: Option<Monthiversary>,
    milestone: Option<Milestone>,
    now: NaiveDateTime,
) -> Option<ScheduledEvent> {
    let milestone_first = match (&monthiversary, &milestone) {
        (_, None) => false,
        (None, Some(_)) => true,
        (Some(month), Some(mile)) => mile.days_away <= month.days_away,
    };
    if milestone_first {
        let mile = milestone?;
        return Some(ScheduledEvent {
            kind: EventKind::Milestone(mile.days),
            target: mile.target,
            days_away: mile.days_away,
            remaining: mile.target - now,
        });
    }
    let month = monthiversary?;
    Some(ScheduledEvent {
        kind: EventKind::Monthiversary,
        target: month.target,
        days_away: month.days_away,
        remaining: month.target - now,
    })
}

/// `None` when the anniversary cannot be parsed; callers render nothing.
pub fn outlook(anniversary: &str, milestones: &[u32], now: NaiveDateTime) -> Option<Outlook> {
    let anniversary = parse_anniversary(anniversary)?;
    Some(outlook_for(anniversary, milestones, now))
}

pub fn outlook_for(anniversary: NaiveDate, milestones: &[u32], now: NaiveDateTime) -> Outlook {
    let days_together = days_together(anniversary, now);
    let monthiversary = next_monthiversary(anniversary, now);
    let milestone = milestone_for(anniversary, milestones, days_together);
    Outlook {
        anniversary,
        days_together,
        monthiversary,
        milestone,
        next: select_next_event(monthiversary, milestone, now),
    }
}

/// Outlook for a view that refreshes on a wall-clock tick. The next event is
/// chosen as of `now - hold`, so an event reached moments ago stays selected
/// while it is celebrated; `days_together` and `remaining` use `now`.
pub fn outlook_holding(
    anniversary: &str,
    milestones: &[u32],
    now: NaiveDateTime,
    hold: Duration,
) -> Option<Outlook> {
    let anniversary = parse_anniversary(anniversary)?;
    let mut view = outlook_for(anniversary, milestones, now - hold.max(Duration::zero()));
    view.days_together = days_together(anniversary, now);
    if let Some(next) = view.next.as_mut() {
        next.remaining = next.target - now;
    }
    Some(view)
}

/// Next local midnight on the anniversary's month and day strictly after
/// `now`. February 29 falls back to February 28 in common years.
pub fn next_yearly_anniversary(anniversary: NaiveDate, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let this_year = anniversary_in_year(anniversary, now.year())?;
    let target = local_midnight(this_year);
    if target > now {
        return Some(target);
    }
    anniversary_in_year(anniversary, now.year() + 1).map(local_midnight)
}

fn anniversary_in_year(anniversary: NaiveDate, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, anniversary.month(), anniversary.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, anniversary.month(), anniversary.day() - 1))
}

/// Milestones already celebrated this session. Only ever grows.
#[derive(Clone, Debug, Default)]
pub struct MilestoneTracker {
    seen: BTreeSet<u32>,
}

impl MilestoneTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the reached milestones that were not seen before, ascending,
    /// and marks them seen.
    pub fn observe(&mut self, days_together: u32, milestones: &[u32]) -> Vec<u32> {
        let mut fresh: Vec<u32> = milestones
            .iter()
            .copied()
            .filter(|days| *days <= days_together && self.seen.insert(*days))
            .collect();
        fresh.sort_unstable();
        fresh
    }

    pub fn has_seen(&self, milestone: u32) -> bool {
        self.seen.contains(&milestone)
    }

    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("date")
    }

    #[test]
    fn parses_common_anniversary_formats() {
        assert_eq!(parse_anniversary("2023-09-27"), Some(date(2023, 9, 27)));
        assert_eq!(
            parse_anniversary("2023-09-27T18:30:00+08:00"),
            Some(date(2023, 9, 27))
        );
        assert_eq!(parse_anniversary("2023-09-27T18:30"), Some(date(2023, 9, 27)));
        assert_eq!(parse_anniversary("someday"), None);
        assert_eq!(parse_anniversary(""), None);
    }

    #[test]
    fn tracker_reports_each_milestone_once() {
        let mut tracker = MilestoneTracker::new();
        assert_eq!(tracker.observe(120, &[100, 365, 30]), vec![30, 100]);
        assert!(tracker.observe(120, &[100, 365, 30]).is_empty());
        assert_eq!(tracker.observe(400, &[100, 365, 30]), vec![365]);
        assert!(tracker.has_seen(365));
        assert_eq!(tracker.seen_count(), 3);
    }
}
