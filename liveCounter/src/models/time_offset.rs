use chrono::{Duration, Months};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;
use crate::config::const_funcs::Timestamp;
use crate::config::constants::*;

/// Future time offsets offered by the projection panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeOffset {
    #[default]
    Now,
    OneWeek,
    TwoWeeks,
    OneMonth,
    TwoMonths,
    ThreeMonths,
    SixMonths,
    OneYear,
}

impl TimeOffset {
    pub const ALL: [TimeOffset; 8] = [
        TimeOffset::Now,
        TimeOffset::OneWeek,
        TimeOffset::TwoWeeks,
        TimeOffset::OneMonth,
        TimeOffset::TwoMonths,
        TimeOffset::ThreeMonths,
        TimeOffset::SixMonths,
        TimeOffset::OneYear,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            TimeOffset::Now => "now",
            TimeOffset::OneWeek => "1week",
            TimeOffset::TwoWeeks => "2weeks",
            TimeOffset::OneMonth => "1month",
            TimeOffset::TwoMonths => "2months",
            TimeOffset::ThreeMonths => "3months",
            TimeOffset::SixMonths => "6months",
            TimeOffset::OneYear => "1year",
        }
    }

    /// Missing or unsupported selections fall back to `Now`.
    pub fn from_selection(selection: Option<&str>) -> Self {
        match selection.map(str::parse::<TimeOffset>) {
            Some(Ok(offset)) => offset,
            Some(Err(e)) => {
                debug!("{}, using zero offset", e);
                TimeOffset::Now
            }
            None => TimeOffset::Now,
        }
    }

    /// Adds the offset to `time`. Months and years are calendar-aware,
    /// clamping to the last day of shorter months.
    pub fn apply(&self, time: Timestamp) -> Timestamp {
        let shifted = match self {
            TimeOffset::Now => Some(time),
            TimeOffset::OneWeek => time.checked_add_signed(Duration::weeks(1)),
            TimeOffset::TwoWeeks => time.checked_add_signed(Duration::weeks(2)),
            TimeOffset::OneMonth => time.checked_add_months(Months::new(1)),
            TimeOffset::TwoMonths => time.checked_add_months(Months::new(2)),
            TimeOffset::ThreeMonths => time.checked_add_months(Months::new(3)),
            TimeOffset::SixMonths => time.checked_add_months(Months::new(6)),
            TimeOffset::OneYear => time.checked_add_months(Months::new(12)),
        };
        shifted.unwrap_or(time)
    }
}

impl FromStr for TimeOffset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeOffset::ALL
            .iter()
            .find(|offset| offset.key() == s)
            .copied()
            .ok_or_else(|| format!("Unknown time offset: {}", s))
    }
}

impl fmt::Display for TimeOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Rate framing used by time-scaled equivalents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Timeframe {
    Second,
    Minute,
    #[default]
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl Timeframe {
    pub fn key(&self) -> &'static str {
        match self {
            Timeframe::Second => "second",
            Timeframe::Minute => "minute",
            Timeframe::Hour => "hour",
            Timeframe::Day => "day",
            Timeframe::Week => "week",
            Timeframe::Month => "month",
            Timeframe::Year => "year",
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            Timeframe::Second => SECONDS_PER_SECOND,
            Timeframe::Minute => SECONDS_PER_TIMEFRAME_MINUTE,
            Timeframe::Hour => SECONDS_PER_TIMEFRAME_HOUR,
            Timeframe::Day => SECONDS_PER_DAY,
            Timeframe::Week => SECONDS_PER_WEEK,
            Timeframe::Month => SECONDS_PER_MONTH,
            Timeframe::Year => SECONDS_PER_YEAR,
        }
    }

    /// Unknown timeframes scale by one second.
    pub fn from_selection(selection: &str) -> Self {
        selection.parse().unwrap_or(Timeframe::Second)
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "second" => Ok(Timeframe::Second),
            "minute" => Ok(Timeframe::Minute),
            "hour" => Ok(Timeframe::Hour),
            "day" => Ok(Timeframe::Day),
            "week" => Ok(Timeframe::Week),
            "month" => Ok(Timeframe::Month),
            "year" => Ok(Timeframe::Year),
            _ => Err(format!("Unknown timeframe: {}", s)),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
