use chrono::{DateTime, Local, NaiveDateTime, Utc};
use js_sys::{Date, Math};

pub(crate) fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

pub(crate) fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

pub(crate) fn now_ms() -> f64 {
    Date::now()
}

/// Converts a local wall-clock instant to UTC, falling back to treating it as
/// UTC when the local time does not exist (DST gap).
pub(crate) fn local_to_utc(local: NaiveDateTime) -> DateTime<Utc> {
    local
        .and_local_timezone(Local)
        .earliest()
        .map(|instant| instant.with_timezone(&Utc))
        .unwrap_or_else(|| local.and_utc())
}

fn splitmix64(mut value: u64) -> u64 {
    value = value.wrapping_add(0x9e3779b97f4a7c15);
    let mut z = value;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Fresh seed for layouts and particles.
pub(crate) fn random_seed() -> u64 {
    let noise = (Math::random() * (u32::MAX as f64)) as u64;
    splitmix64((Date::now() as u64) ^ (noise << 32) ^ noise)
}
