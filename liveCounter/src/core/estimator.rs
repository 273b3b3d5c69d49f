use serde::Serialize;
use tracing::{debug, trace};
use crate::analysis::formatting::{format_breakdown_duration, format_span_short};
use crate::config::const_funcs::{
    calc_hourly_savings, calc_hours_between, calc_rate_per_second, calc_seconds_between,
    calc_simulated_cancellations, Timestamp,
};
use crate::config::constants::{SECONDS_PER_HOUR, SECONDS_PER_MINUTE, HOURS_PER_DAY};
use crate::config::tracker_config::TrackerConfig;
use crate::models::reduction_period::{ReductionPeriod, ReductionSchedule};
use crate::models::time_offset::TimeOffset;
use crate::utils::logging::{self, EstimationType, OperationCategory};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElapsedTime {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub total_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSavings {
    pub description: String,
    pub hours: f64,
    pub duration: String,
    pub savings: f64,   // tons CO2
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimePeriodInfo {
    pub total_hours: f64,
    pub total_days: f64,
    pub display_time: String,
    pub future_time: Timestamp,
}

/// Estimates CO2 avoided by reduced flight volume since a fixed start instant.
#[derive(Debug, Clone)]
pub struct SavingsEstimator {
    start_time: Timestamp,
    hourly_baseline: f64,    // tons CO2 per hour
    schedule: ReductionSchedule,
    affected_airports: u32,
    initial_cancellations: u32,
    cancellations_per_hour: f64,
}

impl SavingsEstimator {
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            start_time: config.start_time,
            hourly_baseline: config.hourly_baseline,
            schedule: config.schedule.clone(),
            affected_airports: config.affected_airports,
            initial_cancellations: config.initial_cancellations,
            cancellations_per_hour: config.cancellations_per_hour,
        }
    }

    pub fn start_time(&self) -> Timestamp {
        self.start_time
    }

    pub fn hourly_baseline(&self) -> f64 {
        self.hourly_baseline
    }

    pub fn schedule(&self) -> &ReductionSchedule {
        &self.schedule
    }

    pub fn affected_airports(&self) -> u32 {
        self.affected_airports
    }

    /// Scheduled reduction fraction at `time`: 0 before the first period,
    /// the final fraction from the last boundary onwards.
    pub fn reduction_fraction_at(&self, time: &Timestamp) -> f64 {
        let fraction = self.schedule.fraction_at(time);
        trace!(%time, fraction, "reduction fraction lookup");
        fraction
    }

    pub fn reduction_phase(&self, now: &Timestamp) -> &str {
        self.schedule.phase_at(now)
    }

    pub fn hourly_savings(&self, now: &Timestamp) -> f64 {
        calc_hourly_savings(self.hourly_baseline, self.reduction_fraction_at(now))
    }

    pub fn rate_per_second(&self, now: &Timestamp) -> f64 {
        calc_rate_per_second(self.hourly_savings(now))
    }

    /// Live counter value: the current instantaneous rate applied to the whole
    /// elapsed duration. Differs from [`Self::progressive_savings`] once the
    /// schedule has stepped more than once.
    pub fn current_savings(&self, now: &Timestamp) -> f64 {
        let _timing = logging::start_timing("current_savings",
            OperationCategory::Estimation { subcategory: EstimationType::CurrentSavings });

        let seconds_elapsed = calc_seconds_between(&self.start_time, now).max(0.0);
        seconds_elapsed * self.rate_per_second(now)
    }

    /// Walks the schedule with an advancing cursor, yielding each non-empty
    /// intersection of a period with `[start, end)`.
    fn period_slices(&self, start: &Timestamp, end: &Timestamp) -> Vec<(&ReductionPeriod, f64)> {
        let mut slices = Vec::new();
        if end <= start {
            return slices;
        }

        let periods = self.schedule.periods();
        let last_index = periods.len() - 1;
        let mut cursor = *start;

        for (index, period) in periods.iter().enumerate() {
            let slice_start = if cursor > period.start { cursor } else { period.start };
            let slice_end = if index == last_index { *end } else { period.end_or(*end) };

            if slice_start < slice_end {
                slices.push((period, calc_hours_between(&slice_start, &slice_end)));
                cursor = slice_end;
            }
        }

        slices
    }

    /// Definite integral of the stepped savings rate over `[start, end)`.
    pub fn progressive_savings(&self, start: &Timestamp, end: &Timestamp) -> f64 {
        let _timing = logging::start_timing("progressive_savings",
            OperationCategory::Estimation { subcategory: EstimationType::ProgressiveSavings });

        self.period_slices(start, end)
            .into_iter()
            .map(|(period, hours)| hours * self.hourly_baseline * period.reduction_fraction)
            .sum()
    }

    /// Per-period contributions to [`Self::progressive_savings`]; empty periods are omitted.
    pub fn period_breakdown(&self, start: &Timestamp, end: &Timestamp) -> Vec<PeriodSavings> {
        let _timing = logging::start_timing("period_breakdown",
            OperationCategory::Estimation { subcategory: EstimationType::PeriodBreakdown });

        self.period_slices(start, end)
            .into_iter()
            .map(|(period, hours)| PeriodSavings {
                description: period.description.clone(),
                hours,
                duration: format_breakdown_duration(hours),
                savings: hours * self.hourly_baseline * period.reduction_fraction,
            })
            .collect()
    }

    pub fn elapsed_time(&self, now: &Timestamp) -> ElapsedTime {
        let total_seconds = calc_seconds_between(&self.start_time, now).max(0.0);
        let whole_seconds = total_seconds.floor() as i64;

        ElapsedTime {
            hours: (total_seconds / SECONDS_PER_HOUR).floor() as i64,
            minutes: (total_seconds / SECONDS_PER_MINUTE).floor() as i64 % 60,
            seconds: whole_seconds % 60,
            total_hours: total_seconds / SECONDS_PER_HOUR,
        }
    }

    pub fn future_time(&self, now: &Timestamp, offset: TimeOffset) -> Timestamp {
        offset.apply(*now)
    }

    /// Total saved from the start instant up to `now + offset`.
    pub fn future_savings(&self, now: &Timestamp, offset: TimeOffset) -> f64 {
        let future = self.future_time(now, offset);
        let savings = self.progressive_savings(&self.start_time, &future);
        debug!(%offset, %future, savings, "projected savings");
        savings
    }

    pub fn time_period_info(&self, now: &Timestamp, offset: TimeOffset) -> TimePeriodInfo {
        let future_time = self.future_time(now, offset);
        let total_hours = calc_hours_between(&self.start_time, &future_time).max(0.0);

        TimePeriodInfo {
            total_hours,
            total_days: total_hours / HOURS_PER_DAY,
            display_time: format_span_short(total_hours, total_hours * 60.0),
            future_time,
        }
    }

    pub fn simulated_cancellations(&self, now: &Timestamp) -> u64 {
        let hours_since_start = calc_hours_between(&self.start_time, now);
        calc_simulated_cancellations(self.initial_cancellations, self.cancellations_per_hour, hours_since_start)
    }
}
