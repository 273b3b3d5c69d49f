use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use crate::config::const_funcs::{parse_reference_time, Timestamp};
use crate::config::constants::*;
use crate::models::reduction_period::{ReductionSchedule, ScheduleError};

#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    JsonError(serde_json::Error),
    ScheduleError(ScheduleError),
    InvalidValue(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::JsonError(err)
    }
}

impl From<ScheduleError> for ConfigError {
    fn from(err: ScheduleError) -> Self {
        ConfigError::ScheduleError(err)
    }
}

impl From<chrono::ParseError> for ConfigError {
    fn from(err: chrono::ParseError) -> Self {
        ConfigError::ScheduleError(ScheduleError::from(err))
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::JsonError(e) => write!(f, "JSON error: {}", e),
            ConfigError::ScheduleError(e) => write!(f, "Schedule error: {}", e),
            ConfigError::InvalidValue(s) => write!(f, "Invalid value: {}", s),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackerConfig {
    pub start_time: Timestamp,
    pub hourly_baseline: f64,          // tons CO2 per hour
    pub schedule: ReductionSchedule,
    pub max_reduction_fraction: f64,   // ceiling for every scheduled fraction
    pub affected_airports: u32,
    pub initial_cancellations: u32,
    pub cancellations_per_hour: f64,
    pub page_url: String,
    pub event_label: String,
    pub animation_duration_ms: u64,
    pub tick_interval_ms: u64,
    pub frame_interval_ms: u64,
}

/// Partial configuration read from a JSON file; absent fields keep the compiled-in value.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigOverrides {
    start_time: Option<Timestamp>,
    hourly_baseline: Option<f64>,
    schedule: Option<ReductionSchedule>,
    max_reduction_fraction: Option<f64>,
    affected_airports: Option<u32>,
    initial_cancellations: Option<u32>,
    cancellations_per_hour: Option<f64>,
    page_url: Option<String>,
    event_label: Option<String>,
    animation_duration_ms: Option<u64>,
    tick_interval_ms: Option<u64>,
    frame_interval_ms: Option<u64>,
}

impl TrackerConfig {
    /// Compiled-in configuration for the November 2025 shutdown.
    pub fn compiled() -> Result<Self, ConfigError> {
        Ok(Self {
            start_time: parse_reference_time(COUNTER_START_TIME)?,
            hourly_baseline: HOURLY_BASELINE_EMISSIONS,
            schedule: ReductionSchedule::faa_shutdown_schedule()?,
            max_reduction_fraction: MAX_REDUCTION_FRACTION,
            affected_airports: AFFECTED_AIRPORTS,
            initial_cancellations: INITIAL_CANCELLATIONS,
            cancellations_per_hour: CANCELLATIONS_PER_HOUR,
            page_url: DEFAULT_PAGE_URL.to_string(),
            event_label: DEFAULT_EVENT_LABEL.to_string(),
            animation_duration_ms: ANIMATION_DURATION_MS,
            tick_interval_ms: TICK_INTERVAL_MS,
            frame_interval_ms: FRAME_INTERVAL_MS,
        })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let overrides: ConfigOverrides = serde_json::from_str(json)?;
        let mut config = Self::compiled()?;
        config.apply(overrides);
        config.validate()?;
        Ok(config)
    }

    fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(v) = overrides.start_time { self.start_time = v; }
        if let Some(v) = overrides.hourly_baseline { self.hourly_baseline = v; }
        if let Some(v) = overrides.schedule { self.schedule = v; }
        if let Some(v) = overrides.max_reduction_fraction { self.max_reduction_fraction = v; }
        if let Some(v) = overrides.affected_airports { self.affected_airports = v; }
        if let Some(v) = overrides.initial_cancellations { self.initial_cancellations = v; }
        if let Some(v) = overrides.cancellations_per_hour { self.cancellations_per_hour = v; }
        if let Some(v) = overrides.page_url { self.page_url = v; }
        if let Some(v) = overrides.event_label { self.event_label = v; }
        if let Some(v) = overrides.animation_duration_ms { self.animation_duration_ms = v; }
        if let Some(v) = overrides.tick_interval_ms { self.tick_interval_ms = v; }
        if let Some(v) = overrides.frame_interval_ms { self.frame_interval_ms = v; }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.hourly_baseline.is_finite() || self.hourly_baseline < 0.0 {
            return Err(ConfigError::InvalidValue(format!(
                "hourly_baseline must be a non-negative number, got {}", self.hourly_baseline
            )));
        }
        if !(0.0..=1.0).contains(&self.max_reduction_fraction) {
            return Err(ConfigError::InvalidValue(format!(
                "max_reduction_fraction must lie in [0, 1], got {}", self.max_reduction_fraction
            )));
        }
        if let Some(period) = self.schedule.periods().iter()
            .find(|p| p.reduction_fraction > self.max_reduction_fraction)
        {
            return Err(ConfigError::InvalidValue(format!(
                "{} exceeds the maximum reduction of {}", period.description, self.max_reduction_fraction
            )));
        }
        if !self.cancellations_per_hour.is_finite() {
            return Err(ConfigError::InvalidValue("cancellations_per_hour must be finite".to_string()));
        }
        if self.animation_duration_ms == 0 || self.tick_interval_ms == 0 || self.frame_interval_ms == 0 {
            return Err(ConfigError::InvalidValue("intervals and durations must be non-zero".to_string()));
        }
        Ok(())
    }
}
