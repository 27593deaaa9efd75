use chrono::{DateTime, Duration, NaiveDate, Utc};
use url::Url;

use crate::schedule::EventKind;

pub const EVENT_LENGTH_MINUTES: i64 = 60;
pub const ICS_PRODID: &str = "-//Relationship Wrapped//EN";
const GOOGLE_CALENDAR_BASE: &str = "https://calendar.google.com/calendar/render";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarEntry {
    pub title: String,
    pub details: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl CalendarEntry {
    /// `local_date` is the event's date on the viewer's calendar, used in
    /// the title; `start` is the same instant in UTC.
    pub fn for_event(kind: EventKind, local_date: NaiveDate, start: DateTime<Utc>) -> Self {
        let (title, details) = match kind {
            EventKind::Monthiversary => (
                format!("Monthiversary — {}", local_date.format("%B %-d, %Y")),
                "Celebrating our monthiversary!".to_string(),
            ),
            EventKind::Milestone(days) => (
                format!("Milestone — {days} days"),
                format!("Reached {days} days together"),
            ),
        };
        Self {
            title,
            details,
            start,
            end: start + Duration::minutes(EVENT_LENGTH_MINUTES),
        }
    }

    pub fn to_ics(&self, uid: &str, stamp: DateTime<Utc>) -> String {
        let lines = [
            "BEGIN:VCALENDAR".to_string(),
            "VERSION:2.0".to_string(),
            format!("PRODID:{ICS_PRODID}"),
            "CALSCALE:GREGORIAN".to_string(),
            "BEGIN:VEVENT".to_string(),
            format!("UID:{uid}"),
            format!("DTSTAMP:{}", ics_timestamp(stamp)),
            format!("DTSTART:{}", ics_timestamp(self.start)),
            format!("DTEND:{}", ics_timestamp(self.end)),
            format!("SUMMARY:{}", escape_ics_text(&self.title)),
            "END:VEVENT".to_string(),
            "END:VCALENDAR".to_string(),
        ];
        lines.join("\r\n")
    }

    pub fn google_url(&self) -> Option<String> {
        let dates = format!("{}/{}", ics_timestamp(self.start), ics_timestamp(self.end));
        Url::parse_with_params(
            GOOGLE_CALENDAR_BASE,
            &[
                ("action", "TEMPLATE"),
                ("text", self.title.as_str()),
                ("dates", dates.as_str()),
                ("details", self.details.as_str()),
            ],
        )
        .ok()
        .map(String::from)
    }
}

pub fn ics_uid(stamp_ms: i64) -> String {
    format!("relwrapped-{stamp_ms}@local")
}

pub fn ics_timestamp(stamp: DateTime<Utc>) -> String {
    stamp.format("%Y%m%dT%H%M%SZ").to_string()
}

fn escape_ics_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).single().expect("utc")
    }

    #[test]
    fn milestone_entry_lasts_one_hour() {
        let start = utc(2026, 1, 2, 16);
        let entry = CalendarEntry::for_event(
            EventKind::Milestone(1000),
            NaiveDate::from_ymd_opt(2026, 1, 3).expect("date"),
            start,
        );
        assert_eq!(entry.title, "Milestone — 1000 days");
        assert_eq!(entry.details, "Reached 1000 days together");
        assert_eq!(entry.end - entry.start, Duration::hours(1));
    }

    #[test]
    fn ics_uses_crlf_and_utc_stamps() {
        let entry = CalendarEntry::for_event(
            EventKind::Monthiversary,
            NaiveDate::from_ymd_opt(2026, 2, 27).expect("date"),
            utc(2026, 2, 26, 16),
        );
        let ics = entry.to_ics(&ics_uid(42), utc(2026, 2, 1, 0));
        let lines: Vec<&str> = ics.split("\r\n").collect();
        assert_eq!(lines.first(), Some(&"BEGIN:VCALENDAR"));
        assert_eq!(lines.last(), Some(&"END:VCALENDAR"));
        assert!(lines.contains(&"UID:relwrapped-42@local"));
        assert!(lines.contains(&"DTSTART:20260226T160000Z"));
        assert!(lines.contains(&"DTEND:20260226T170000Z"));
        assert!(lines.contains(&"SUMMARY:Monthiversary — February 27\\, 2026"));
    }

    #[test]
    fn google_url_carries_template_params() {
        let entry = CalendarEntry::for_event(
            EventKind::Milestone(365),
            NaiveDate::from_ymd_opt(2026, 5, 1).expect("date"),
            utc(2026, 4, 30, 16),
        );
        let url = entry.google_url().expect("url");
        let parsed = Url::parse(&url).expect("parse");
        let params: Vec<(String, String)> = parsed
            .query_pairs()
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        assert!(params.contains(&("action".to_string(), "TEMPLATE".to_string())));
        assert!(params.contains(&(
            "dates".to_string(),
            "20260430T160000Z/20260430T170000Z".to_string()
        )));
        assert!(params.contains(&("text".to_string(), "Milestone — 365 days".to_string())));
    }
}
