use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};
use crate::config::constants::*;

pub type Timestamp = DateTime<FixedOffset>;

/// Fixed reference zone used for every schedule comparison and displayed time.
pub fn reference_offset() -> FixedOffset {
    // REFERENCE_UTC_OFFSET_SECONDS is well inside the +/-24h range FixedOffset accepts
    FixedOffset::east_opt(REFERENCE_UTC_OFFSET_SECONDS).unwrap_or_else(|| Utc.fix())
}

pub fn parse_reference_time(iso: &str) -> Result<Timestamp, chrono::ParseError> {
    DateTime::parse_from_rfc3339(iso).map(|t| t.with_timezone(&reference_offset()))
}

pub fn to_reference_zone<Tz: TimeZone>(time: &DateTime<Tz>) -> Timestamp {
    time.with_timezone(&reference_offset())
}

/// Signed hours between two instants, millisecond precision.
pub fn calc_hours_between(start: &Timestamp, end: &Timestamp) -> f64 {
    (*end - *start).num_milliseconds() as f64 / (SECONDS_PER_HOUR * 1000.0)
}

/// Signed seconds between two instants, millisecond precision.
pub fn calc_seconds_between(start: &Timestamp, end: &Timestamp) -> f64 {
    (*end - *start).num_milliseconds() as f64 / 1000.0
}

pub fn calc_hourly_savings(hourly_baseline: f64, reduction_fraction: f64) -> f64 {
    hourly_baseline * reduction_fraction
}

pub fn calc_rate_per_second(hourly_savings: f64) -> f64 {
    hourly_savings / SECONDS_PER_HOUR
}

pub fn calc_simulated_cancellations(initial: u32, per_hour: f64, hours_since_start: f64) -> u64 {
    (initial as f64 + hours_since_start.max(0.0) * per_hour).floor() as u64
}
