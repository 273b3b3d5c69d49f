//! Number, duration and timestamp formatting for display slots.
//!
//! Pure functions shared by the snapshot builder, the converter and the
//! share text. Grouped integers use en-US separators.

use crate::config::const_funcs::Timestamp;
use crate::config::constants::{HOURS_PER_DAY, MILLION, THOUSAND};

/// Compact display of an equivalent count: `2.5M`, `1.5K` or a grouped integer.
pub fn format_number(num: i64) -> String {
    let value = num as f64;
    if value >= MILLION {
        format!("{}M", to_fixed_1(value / MILLION))
    } else if value >= THOUSAND {
        format!("{}K", to_fixed_1(value / THOUSAND))
    } else {
        format_grouped(num)
    }
}

/// Formats `current` using the magnitude of `target`, so an animated value keeps
/// the same suffix for the whole transition.
pub fn format_by_target(current: i64, target: i64) -> String {
    let target = target as f64;
    let value = current as f64;
    if target >= MILLION {
        format!("{}M", to_fixed_1(value / MILLION))
    } else if target >= THOUSAND {
        format!("{}K", to_fixed_1(value / THOUSAND))
    } else {
        format_grouped(current)
    }
}

/// One decimal place, rounded on the exact binary value. Only an exact
/// midpoint rounds away from zero; `1.45` is stored below the midpoint and gives `1.4`.
fn to_fixed_1(x: f64) -> String {
    let exact = format!("{:.80}", x.abs());
    let tenths_end = exact.find('.').map_or(exact.len(), |dot| dot + 2);
    let (head, tail) = exact.split_at(tenths_end.min(exact.len()));

    let is_midpoint = tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0');
    let magnitude = match head.parse::<f64>() {
        Ok(truncated) if is_midpoint => format!("{:.1}", truncated + 0.1),
        _ => format!("{:.1}", x.abs()),
    };

    if x < 0.0 { format!("-{}", magnitude) } else { magnitude }
}

/// Integer with thousands separators.
pub fn format_grouped(n: i64) -> String {
    let negative = n < 0;
    let digits = n.unsigned_abs().to_string();
    let len = digits.len();

    let mut out = String::with_capacity(len + len / 3 + 1);
    if negative {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Floors a tonnage and groups it, e.g. `109601.28` -> `109,601`.
pub fn format_tons(tons: f64) -> String {
    format_grouped(tons.floor() as i64)
}

pub fn format_decimal(value: f64, digits: usize) -> String {
    format!("{:.*}", digits, value)
}

pub fn format_clock(hours: i64, minutes: i64, seconds: i64) -> String {
    format!("{}h {}m {}s", hours, minutes, seconds)
}

/// `"{d}d {h}h"` once a span reaches a day, `"{h}h {m}m"` below that.
pub fn format_span_short(total_hours: f64, total_minutes: f64) -> String {
    let whole_hours = total_hours.max(0.0).floor() as i64;
    let days = whole_hours / HOURS_PER_DAY as i64;
    let hours = whole_hours % HOURS_PER_DAY as i64;

    if days > 0 {
        format!("{}d {}h", days, hours)
    } else {
        let minutes = (total_minutes.max(0.0) % 60.0).floor() as i64;
        format!("{}h {}m", hours, minutes)
    }
}

/// Duration label for a breakdown row: `"{d}d {h}h"` or `"{h}h"`.
pub fn format_breakdown_duration(hours: f64) -> String {
    let days = (hours / HOURS_PER_DAY).floor() as i64;
    let remaining = (hours % HOURS_PER_DAY).floor() as i64;

    if days > 0 {
        format!("{}d {}h", days, remaining)
    } else {
        format!("{}h", hours.floor() as i64)
    }
}

/// e.g. `Nov 21, 2025, 6:00 AM UTC-05:00`
pub fn format_timestamp(time: &Timestamp) -> String {
    time.format("%b %-d, %Y, %-I:%M %p UTC%:z").to_string()
}

/// e.g. `Nov 21, 6:00:05 AM UTC-05:00`
pub fn format_clock_time(time: &Timestamp) -> String {
    time.format("%b %-d, %-I:%M:%S %p UTC%:z").to_string()
}
