use serde::Serialize;
use crate::analysis::formatting::*;
use crate::config::const_funcs::{calc_seconds_between, Timestamp};
use crate::core::converter::{EquivalenceConverter, Equivalents};
use crate::core::estimator::{PeriodSavings, SavingsEstimator};
use crate::models::equivalent::EquivalentKind;
use crate::models::time_offset::{TimeOffset, Timeframe};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimationDetails {
    pub current_time: String,
    pub current_reduction: String,
    pub hourly_savings: String,
    pub rate_per_second: String,
    pub time_elapsed: String,
    pub total_saved: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FutureEstimate {
    pub offset: TimeOffset,
    pub total_tons: f64,
    pub total_saved: String,
    pub elapsed: String,
    pub estimated_by: String,
    pub breakdown: Vec<PeriodSavings>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeScaledLine {
    pub timeframe: Timeframe,
    pub kind: EquivalentKind,
    pub text: String,
}

/// Every named display slot for one tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub generated_at: Timestamp,
    pub savings_tons: f64,
    pub savings_total: String,
    pub rate_per_second: String,
    pub affected_airports: u32,
    pub cancellations: String,
    pub elapsed_time: String,
    pub share_savings: String,
    pub share_time: String,
    pub estimation: EstimationDetails,
    pub formula_lines: Vec<String>,
    pub estimation_steps: Vec<String>,
    pub future: FutureEstimate,
    pub selected_equivalent: EquivalentKind,
    pub equivalents: Equivalents,
    pub time_scaled: TimeScaledLine,
    pub share_text: String,
}

impl DashboardSnapshot {
    pub fn build(
        estimator: &SavingsEstimator,
        converter: &EquivalenceConverter,
        now: Timestamp,
        offset: TimeOffset,
        timeframe: Timeframe,
    ) -> Self {
        let savings = estimator.current_savings(&now);
        let elapsed = estimator.elapsed_time(&now);
        let reduction = estimator.reduction_fraction_at(&now);
        let hourly_savings = estimator.hourly_savings(&now);
        let rate = estimator.rate_per_second(&now);
        let seconds_elapsed = calc_seconds_between(&estimator.start_time(), &now).max(0.0);

        let reduction_percent = format_decimal(reduction * 100.0, 0);
        let baseline = format_tons(estimator.hourly_baseline());
        let hourly = format_tons(hourly_savings);
        let rate_3 = format_decimal(rate, 3);
        let seconds = format_tons(seconds_elapsed);
        let total = format_tons(savings);
        let clock = format_clock(elapsed.hours, elapsed.minutes, elapsed.seconds);

        let estimation = EstimationDetails {
            current_time: format_clock_time(&now),
            current_reduction: format!("{}% ({})", reduction_percent, estimator.reduction_phase(&now)),
            hourly_savings: format!("{} tons CO₂/hour", hourly),
            rate_per_second: format!("{} tons CO₂/second", rate_3),
            time_elapsed: clock.clone(),
            total_saved: format!("{} tons CO₂", total),
        };

        let formula_lines = vec![
            format!("Baseline Emissions: {} tons CO₂/hour", baseline),
            format!("Current Reduction: {}%", reduction_percent),
            format!("Hourly Savings: {} × {} = {} tons CO₂/hour", baseline, format_decimal(reduction, 2), hourly),
            format!("Rate per Second: {} ÷ 3600 = {} tons CO₂/second", hourly, rate_3),
            format!("Time Elapsed: {} seconds", seconds),
            format!("Total Saved: {} × {} = {} tons CO₂", rate_3, seconds, total),
        ];

        let estimation_steps = vec![
            format!("Start with baseline US domestic aviation emissions: {} tons CO₂/hour", baseline),
            format!("Apply current reduction level: {}%", reduction_percent),
            format!("Estimate hourly savings: {} tons CO₂/hour", hourly),
            format!("Convert to per-second rate: {} tons CO₂/second", rate_3),
            format!("Multiply by elapsed time: {} seconds", seconds),
            format!("Result: {} tons CO₂ saved", total),
        ];

        let info = estimator.time_period_info(&now, offset);
        let start = estimator.start_time();
        let future_tons = estimator.progressive_savings(&start, &info.future_time);
        let future = FutureEstimate {
            offset,
            total_tons: future_tons,
            total_saved: format_tons(future_tons),
            elapsed: info.display_time.clone(),
            estimated_by: format_timestamp(&info.future_time),
            breakdown: estimator.period_breakdown(&start, &info.future_time),
        };

        let selected = converter.selected();
        let scaled = converter.time_scaled_equivalents(rate, timeframe);
        let time_scaled = TimeScaledLine {
            timeframe,
            kind: selected,
            text: scaled
                .get(&selected)
                .map(|v| format!("{} {} per {}", v.formatted, v.unit, timeframe))
                .unwrap_or_default(),
        };

        Self {
            generated_at: now,
            savings_tons: savings,
            savings_total: total,
            rate_per_second: format_decimal(rate, 2),
            affected_airports: estimator.affected_airports(),
            cancellations: format_grouped(estimator.simulated_cancellations(&now) as i64),
            elapsed_time: format!("{} since FAA reductions began", clock),
            share_savings: format_tons(savings),
            share_time: format!("{}h {}m elapsed", elapsed.hours, elapsed.minutes),
            estimation,
            formula_lines,
            estimation_steps,
            future,
            selected_equivalent: selected,
            equivalents: converter.compute_equivalents(savings),
            time_scaled,
            share_text: converter.share_text(savings),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::const_funcs::parse_reference_time;
    use crate::config::tracker_config::TrackerConfig;

    #[test]
    fn test_snapshot_slots_in_initial_phase() {
        let config = TrackerConfig::compiled().unwrap();
        let estimator = SavingsEstimator::new(&config);
        let converter = EquivalenceConverter::from_config(&config);
        let now = parse_reference_time("2025-11-07T16:00:00-05:00").unwrap();

        let snapshot = DashboardSnapshot::build(&estimator, &converter, now, TimeOffset::Now, Timeframe::Hour);

        assert_eq!(snapshot.savings_total, "11,416");
        assert_eq!(snapshot.rate_per_second, "0.32");
        assert_eq!(snapshot.elapsed_time, "10h 0m 0s since FAA reductions began");
        assert_eq!(snapshot.share_time, "10h 0m elapsed");
        assert_eq!(snapshot.cancellations, "1,315");
        assert_eq!(snapshot.estimation.current_reduction, "4% (Initial phase)");
        assert_eq!(snapshot.estimation.hourly_savings, "1,141 tons CO₂/hour");
        assert_eq!(snapshot.formula_lines[4], "Time Elapsed: 36,000 seconds");
        assert_eq!(snapshot.future.breakdown.len(), 1);
        assert_eq!(snapshot.future.elapsed, "10h 0m");
        assert_eq!(snapshot.selected_equivalent, EquivalentKind::Cars);
        assert_eq!(snapshot.equivalents.len(), 6);
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let config = TrackerConfig::compiled().unwrap();
        let estimator = SavingsEstimator::new(&config);
        let converter = EquivalenceConverter::from_config(&config);
        let now = parse_reference_time("2025-11-20T12:00:00-05:00").unwrap();

        let snapshot = DashboardSnapshot::build(&estimator, &converter, now, TimeOffset::OneMonth, Timeframe::Day);
        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["affected_airports"], 40);
        assert_eq!(json["future"]["offset"], "OneMonth");
        assert!(json["equivalents"]["trees"]["value"].as_i64().unwrap() > 0);
    }
}
