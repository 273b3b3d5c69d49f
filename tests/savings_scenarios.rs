use chrono::Duration;

use co2saved::analysis::formatting::{format_number, format_tons};
use co2saved::analysis::snapshot::DashboardSnapshot;
use co2saved::config::const_funcs::{parse_reference_time, Timestamp};
use co2saved::core::animation::interpolate;
use co2saved::models::equivalent::EquivalentKind;
use co2saved::models::time_offset::{TimeOffset, Timeframe};
use co2saved::{EquivalenceConverter, SavingsEstimator, TrackerConfig};

fn setup() -> (SavingsEstimator, EquivalenceConverter) {
    let config = TrackerConfig::compiled().unwrap();
    (SavingsEstimator::new(&config), EquivalenceConverter::from_config(&config))
}

fn at(s: &str) -> Timestamp {
    parse_reference_time(s).unwrap()
}

#[test]
fn first_period_integral_matches_published_total() {
    let (estimator, _) = setup();
    let savings = estimator.progressive_savings(&at("2025-11-07T00:00:00-05:00"), &at("2025-11-11T00:00:00-05:00"));

    assert!((savings - 109_601.28).abs() < 1e-6);
    assert_eq!(format_tons(savings), "109,601");
}

#[test]
fn fraction_follows_schedule_boundaries() {
    let (estimator, _) = setup();

    assert_eq!(estimator.reduction_fraction_at(&at("2025-11-06T23:59:59-05:00")), 0.0);
    assert_eq!(estimator.reduction_fraction_at(&at("2025-11-07T00:00:00-05:00")), 0.04);
    assert_eq!(estimator.reduction_fraction_at(&at("2025-11-10T23:59:59-05:00")), 0.04);
    // A boundary instant belongs to the later period
    assert_eq!(estimator.reduction_fraction_at(&at("2025-11-11T00:00:00-05:00")), 0.06);
    assert_eq!(estimator.reduction_fraction_at(&at("2025-11-13T00:00:00-05:00")), 0.08);
    assert_eq!(estimator.reduction_fraction_at(&at("2025-11-14T00:00:00-05:00")), 0.10);
    assert_eq!(estimator.reduction_fraction_at(&at("2027-01-01T00:00:00-05:00")), 0.10);
}

#[test]
fn progressive_savings_is_additive_and_monotonic() {
    let (estimator, _) = setup();
    let points = [
        "2025-11-06T12:00:00-05:00",
        "2025-11-09T07:30:00-05:00",
        "2025-11-11T00:00:00-05:00",
        "2025-11-13T18:45:00-05:00",
        "2025-12-25T00:00:00-05:00",
    ];
    let a = at(points[0]);

    for window in points.windows(2) {
        let (b, c) = (at(window[0]), at(window[1]));
        let split = estimator.progressive_savings(&a, &b) + estimator.progressive_savings(&b, &c);
        let whole = estimator.progressive_savings(&a, &c);
        assert!((split - whole).abs() < 1e-6);
        assert!(whole >= estimator.progressive_savings(&a, &b));
    }

    let end = at(points[4]);
    assert_eq!(estimator.progressive_savings(&end, &a), 0.0);
    assert_eq!(estimator.progressive_savings(&end, &end), 0.0);
}

#[test]
fn breakdown_sums_to_progressive_total() {
    let (estimator, _) = setup();
    let start = estimator.start_time();
    let end = at("2025-11-20T12:00:00-05:00");

    let breakdown = estimator.period_breakdown(&start, &end);
    let total: f64 = breakdown.iter().map(|p| p.savings).sum();

    assert_eq!(breakdown.len(), 4);
    assert!((total - estimator.progressive_savings(&start, &end)).abs() < 1e-6);
}

#[test]
fn current_savings_extrapolates_instantaneous_rate() {
    let (estimator, _) = setup();
    let now = at("2025-11-14T06:00:00-05:00");

    // Seven days at the current 10% rate, not the integral over the schedule
    let expected = 7.0 * 24.0 * 28_542.0 * 0.10;
    assert!((estimator.current_savings(&now) - expected).abs() < 1e-6);
    assert!(estimator.current_savings(&now) > estimator.progressive_savings(&estimator.start_time(), &now));

    assert_eq!(estimator.current_savings(&at("2025-11-01T00:00:00-05:00")), 0.0);
}

#[test]
fn selected_trees_for_a_thousand_tons() {
    let (_, mut converter) = setup();
    converter.select("trees");
    converter.select("not-a-key");

    let equivalents = converter.compute_equivalents(1000.0);
    let trees = &equivalents[&EquivalentKind::Trees];
    assert_eq!(converter.selected(), EquivalentKind::Trees);
    assert_eq!(trees.value, 16_500);
    assert_eq!(trees.formatted, "16.5K");
}

#[test]
fn ease_out_halfway_value() {
    assert_eq!(interpolate(0, 1000, 0.5), 875);
}

#[test]
fn compact_number_formatting() {
    assert_eq!(format_number(999), "999");
    assert_eq!(format_number(1_000), "1.0K");
    assert_eq!(format_number(16_500), "16.5K");
    assert_eq!(format_number(2_500_000), "2.5M");
}

#[test]
fn future_offset_grows_with_distance() {
    let (estimator, converter) = setup();
    let now = at("2025-11-20T12:00:00-05:00");

    let totals: Vec<f64> = TimeOffset::ALL
        .iter()
        .map(|offset| estimator.future_savings(&now, *offset))
        .collect();
    for pair in totals.windows(2) {
        assert!(pair[1] > pair[0]);
    }

    let snapshot = DashboardSnapshot::build(&estimator, &converter, now, TimeOffset::OneMonth, Timeframe::Week);
    assert_eq!(snapshot.future.estimated_by, "Dec 20, 2025, 12:00 PM UTC-05:00");
    assert!(snapshot.time_scaled.text.ends_with("per week"));
}

#[test]
fn live_counter_increases_every_second() {
    let (estimator, _) = setup();
    let mut now = at("2025-11-15T00:00:00-05:00");
    let mut previous = estimator.current_savings(&now);
    for _ in 0..5 {
        now = now + Duration::seconds(1);
        let current = estimator.current_savings(&now);
        assert!((current - previous - 28_542.0 * 0.10 / 3600.0).abs() < 1e-6);
        previous = current;
    }
}
