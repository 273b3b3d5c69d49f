use serde::{Deserialize, Serialize};
use std::fmt;
use crate::config::const_funcs::{parse_reference_time, Timestamp};
use crate::config::constants::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReductionPeriod {
    pub start: Timestamp,
    pub end: Option<Timestamp>,     // None for the open-ended final period
    pub reduction_fraction: f64,    // 0.0 to 1.0
    pub description: String,        // e.g. "4% reduction"
    pub phase: String,              // e.g. "Initial phase"
}

impl ReductionPeriod {
    pub fn new(
        start: Timestamp,
        end: Option<Timestamp>,
        reduction_fraction: f64,
        phase: &str,
    ) -> Self {
        Self {
            start,
            end,
            reduction_fraction,
            description: format!("{:.0}% reduction", reduction_fraction * 100.0),
            phase: phase.to_string(),
        }
    }

    /// Closed-open containment: `[start, end)`.
    pub fn contains(&self, time: &Timestamp) -> bool {
        *time >= self.start && self.end.map_or(true, |end| *time < end)
    }

    /// End of the period, clamped to `limit` for the open-ended final period.
    pub fn end_or(&self, limit: Timestamp) -> Timestamp {
        match self.end {
            Some(end) if end < limit => end,
            _ => limit,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleError {
    Empty,
    InvalidFraction { index: usize, fraction: f64 },
    EmptyPeriod { index: usize },
    OpenEndedBeforeLast { index: usize },
    NotContiguous { index: usize },
    InvalidTimestamp(String),
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::Empty => write!(f, "Reduction schedule has no periods"),
            ScheduleError::InvalidFraction { index, fraction } => {
                write!(f, "Period {} has reduction fraction {} outside [0, 1]", index, fraction)
            }
            ScheduleError::EmptyPeriod { index } => {
                write!(f, "Period {} does not start before it ends", index)
            }
            ScheduleError::OpenEndedBeforeLast { index } => {
                write!(f, "Period {} is open-ended but is not the last period", index)
            }
            ScheduleError::NotContiguous { index } => {
                write!(f, "Period {} does not start where the previous period ends", index)
            }
            ScheduleError::InvalidTimestamp(s) => write!(f, "Invalid schedule timestamp: {}", s),
        }
    }
}

impl std::error::Error for ScheduleError {}

impl From<chrono::ParseError> for ScheduleError {
    fn from(err: chrono::ParseError) -> Self {
        ScheduleError::InvalidTimestamp(err.to_string())
    }
}

/// Ordered, contiguous, non-overlapping sequence of reduction periods.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ReductionSchedule {
    periods: Vec<ReductionPeriod>,
}

impl ReductionSchedule {
    pub fn new(periods: Vec<ReductionPeriod>) -> Result<Self, ScheduleError> {
        if periods.is_empty() {
            return Err(ScheduleError::Empty);
        }

        let last_index = periods.len() - 1;
        for (index, period) in periods.iter().enumerate() {
            let fraction = period.reduction_fraction;
            if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
                return Err(ScheduleError::InvalidFraction { index, fraction });
            }
            match period.end {
                Some(end) if end <= period.start => {
                    return Err(ScheduleError::EmptyPeriod { index });
                }
                None if index != last_index => {
                    return Err(ScheduleError::OpenEndedBeforeLast { index });
                }
                _ => {}
            }
            if index > 0 && periods[index - 1].end != Some(period.start) {
                return Err(ScheduleError::NotContiguous { index });
            }
        }

        Ok(Self { periods })
    }

    /// The November 2025 FAA flight reduction schedule.
    pub fn faa_shutdown_schedule() -> Result<Self, ScheduleError> {
        let nov7 = parse_reference_time(SCHEDULE_NOV_7)?;
        let nov11 = parse_reference_time(SCHEDULE_NOV_11)?;
        let nov13 = parse_reference_time(SCHEDULE_NOV_13)?;
        let nov14 = parse_reference_time(SCHEDULE_NOV_14)?;

        Self::new(vec![
            ReductionPeriod::new(nov7, Some(nov11), INITIAL_REDUCTION, PHASE_INITIAL),
            ReductionPeriod::new(nov11, Some(nov13), MODERATE_REDUCTION, PHASE_MODERATE),
            ReductionPeriod::new(nov13, Some(nov14), HIGH_REDUCTION, PHASE_HIGH),
            ReductionPeriod::new(nov14, None, MAXIMUM_REDUCTION, PHASE_MAXIMUM),
        ])
    }

    pub fn periods(&self) -> &[ReductionPeriod] {
        &self.periods
    }

    /// Period active at `time`; the last period extends to infinity.
    /// A moment exactly on a boundary belongs to the later period.
    pub fn period_at(&self, time: &Timestamp) -> Option<&ReductionPeriod> {
        let after = self.periods.partition_point(|p| p.start <= *time);
        if after == 0 {
            None
        } else {
            Some(&self.periods[after - 1])
        }
    }

    pub fn fraction_at(&self, time: &Timestamp) -> f64 {
        self.period_at(time).map_or(0.0, |p| p.reduction_fraction)
    }

    pub fn phase_at(&self, time: &Timestamp) -> &str {
        self.period_at(time).map_or(PHASE_BEFORE_REDUCTIONS, |p| p.phase.as_str())
    }
}

impl<'de> Deserialize<'de> for ReductionSchedule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let periods = Vec::<ReductionPeriod>::deserialize(deserializer)?;
        ReductionSchedule::new(periods).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(iso: &str) -> Timestamp {
        parse_reference_time(iso).unwrap()
    }

    #[test]
    fn test_default_schedule_is_valid() {
        let schedule = ReductionSchedule::faa_shutdown_schedule().unwrap();
        assert_eq!(schedule.periods().len(), 4);
        assert_eq!(schedule.periods()[0].description, "4% reduction");
        assert_eq!(schedule.periods()[3].description, "10% reduction");
    }

    #[test]
    fn test_boundary_belongs_to_later_period() {
        let schedule = ReductionSchedule::faa_shutdown_schedule().unwrap();
        assert_eq!(schedule.fraction_at(&t(SCHEDULE_NOV_11)), 0.06);
        assert_eq!(schedule.fraction_at(&t("2025-11-10T23:59:59-05:00")), 0.04);
        assert_eq!(schedule.fraction_at(&t(SCHEDULE_NOV_14)), 0.10);
    }

    #[test]
    fn test_before_first_period_is_zero() {
        let schedule = ReductionSchedule::faa_shutdown_schedule().unwrap();
        assert_eq!(schedule.fraction_at(&t("2025-11-06T23:59:59-05:00")), 0.0);
        assert_eq!(schedule.phase_at(&t("2025-01-01T00:00:00-05:00")), PHASE_BEFORE_REDUCTIONS);
    }

    #[test]
    fn test_finite_last_period_extends_forever() {
        let a = t("2025-01-01T00:00:00-05:00");
        let b = t("2025-01-02T00:00:00-05:00");
        let schedule = ReductionSchedule::new(vec![ReductionPeriod::new(a, Some(b), 0.3, "only")]).unwrap();
        assert_eq!(schedule.fraction_at(&t("2030-01-01T00:00:00-05:00")), 0.3);
    }

    #[test]
    fn test_rejects_gaps_and_bad_fractions() {
        let a = t("2025-01-01T00:00:00-05:00");
        let b = t("2025-01-02T00:00:00-05:00");
        let c = t("2025-01-03T00:00:00-05:00");

        assert_eq!(ReductionSchedule::new(vec![]), Err(ScheduleError::Empty));
        assert_eq!(
            ReductionSchedule::new(vec![
                ReductionPeriod::new(a, Some(b), 0.1, "x"),
                ReductionPeriod::new(c, None, 0.2, "y"),
            ]),
            Err(ScheduleError::NotContiguous { index: 1 })
        );
        assert!(matches!(
            ReductionSchedule::new(vec![ReductionPeriod::new(a, None, 1.5, "x")]),
            Err(ScheduleError::InvalidFraction { index: 0, .. })
        ));
        assert_eq!(
            ReductionSchedule::new(vec![
                ReductionPeriod::new(a, None, 0.1, "x"),
                ReductionPeriod::new(b, None, 0.2, "y"),
            ]),
            Err(ScheduleError::OpenEndedBeforeLast { index: 0 })
        );
        assert_eq!(
            ReductionSchedule::new(vec![ReductionPeriod::new(b, Some(a), 0.1, "x")]),
            Err(ScheduleError::EmptyPeriod { index: 0 })
        );
    }

    #[test]
    fn test_schedule_deserializes_with_validation() {
        let json = r#"[
            {"start": "2025-11-07T00:00:00-05:00", "end": "2025-11-08T00:00:00-05:00",
             "reduction_fraction": 0.04, "description": "4% reduction", "phase": "Initial phase"},
            {"start": "2025-11-08T00:00:00-05:00", "end": null,
             "reduction_fraction": 0.10, "description": "10% reduction", "phase": "Maximum reduction"}
        ]"#;
        let schedule: ReductionSchedule = serde_json::from_str(json).unwrap();
        assert_eq!(schedule.periods().len(), 2);

        let bad = r#"[{"start": "2025-11-07T00:00:00-05:00", "end": null,
            "reduction_fraction": 2.0, "description": "", "phase": ""}]"#;
        assert!(serde_json::from_str::<ReductionSchedule>(bad).is_err());
    }
}
