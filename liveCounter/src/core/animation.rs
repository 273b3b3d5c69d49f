use crate::analysis::formatting::format_by_target;
use crate::config::const_funcs::{calc_seconds_between, Timestamp};

/// Ease-out cubic: `1 - (1 - p)^3`, with `p` clamped to `[0, 1]`.
pub fn ease_out_cubic(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// Displayed value at a given progress: `floor(old + (new - old) * ease(progress))`.
pub fn interpolate(old: i64, new: i64, progress: f64) -> i64 {
    let delta = (new - old) as f64;
    (old as f64 + delta * ease_out_cubic(progress)).floor() as i64
}

/// Animated move of one displayed counter from `from` to `to`.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterTransition {
    pub from: i64,
    pub to: i64,
    started_at: Timestamp,
    duration_ms: u64,
}

impl CounterTransition {
    pub fn new(from: i64, to: i64, started_at: Timestamp, duration_ms: u64) -> Self {
        Self { from, to, started_at, duration_ms }
    }

    pub fn progress(&self, now: &Timestamp) -> f64 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        let elapsed_ms = calc_seconds_between(&self.started_at, now) * 1000.0;
        (elapsed_ms / self.duration_ms as f64).clamp(0.0, 1.0)
    }

    pub fn value_at(&self, now: &Timestamp) -> i64 {
        interpolate(self.from, self.to, self.progress(now))
    }

    pub fn is_complete(&self, now: &Timestamp) -> bool {
        self.progress(now) >= 1.0
    }

    /// Interpolated value formatted with the suffix of the target magnitude.
    pub fn display_at(&self, now: &Timestamp) -> String {
        format_by_target(self.value_at(now), self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use crate::config::const_funcs::parse_reference_time;

    #[test]
    fn test_interpolate_at_fixed_progress() {
        assert_eq!(interpolate(0, 1000, 0.0), 0);
        assert_eq!(interpolate(0, 1000, 0.5), 875);
        assert_eq!(interpolate(0, 1000, 1.0), 1000);
        assert_eq!(interpolate(0, 1000, 2.0), 1000);
        assert_eq!(interpolate(1000, 0, 0.5), 125);
    }

    #[test]
    fn test_transition_progress_over_duration() {
        let start = parse_reference_time("2025-11-08T00:00:00-05:00").unwrap();
        let transition = CounterTransition::new(0, 1000, start, 1000);

        let halfway = start + Duration::milliseconds(500);
        assert_eq!(transition.value_at(&halfway), 875);
        assert_eq!(transition.display_at(&halfway), "0.9K");
        assert!(!transition.is_complete(&halfway));

        let done = start + Duration::milliseconds(1500);
        assert_eq!(transition.value_at(&done), 1000);
        assert!(transition.is_complete(&done));

        let before = start - Duration::milliseconds(10);
        assert_eq!(transition.value_at(&before), 0);
    }
}
