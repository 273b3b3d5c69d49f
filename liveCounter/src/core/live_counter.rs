use chrono::Duration;
use tracing::{debug, info};
use crate::analysis::snapshot::DashboardSnapshot;
use crate::config::const_funcs::Timestamp;
use crate::config::tracker_config::TrackerConfig;
use crate::core::converter::EquivalenceConverter;
use crate::core::estimator::SavingsEstimator;
use crate::models::time_offset::{TimeOffset, Timeframe};
use crate::utils::logging::{self, OperationCategory};
use crate::utils::traits::{Clock, DisplaySink};

/// Fixed-interval schedule for one cooperative task.
#[derive(Debug, Clone)]
struct PeriodicTask {
    interval: Duration,
    next_due: Option<Timestamp>,
}

impl PeriodicTask {
    fn every_ms(interval_ms: u64) -> Self {
        Self {
            interval: Duration::milliseconds(interval_ms as i64),
            next_due: None,
        }
    }

    /// Returns true and schedules the next run when the task is due at `now`.
    fn poll(&mut self, now: &Timestamp) -> bool {
        match self.next_due {
            Some(due) if *now < due => false,
            _ => {
                self.next_due = Some(*now + self.interval);
                true
            }
        }
    }

    fn until_due(&self, now: &Timestamp) -> Duration {
        self.next_due
            .map(|due| due - *now)
            .filter(|d| *d > Duration::zero())
            .unwrap_or_else(Duration::zero)
    }
}

/// Owns the estimator, converter, clock and display, and drives two tasks on
/// one thread: a tick that recomputes every display slot, and a frame task that
/// animates equivalent counters toward the value the last tick published.
pub struct LiveCounter<C: Clock, D: DisplaySink> {
    estimator: SavingsEstimator,
    converter: EquivalenceConverter,
    clock: C,
    display: D,
    offset: TimeOffset,
    timeframe: Timeframe,
    animate: bool,
    tick_task: PeriodicTask,
    frame_task: PeriodicTask,
    published_savings: Option<f64>,
    last_snapshot: Option<DashboardSnapshot>,
}

impl<C: Clock, D: DisplaySink> LiveCounter<C, D> {
    pub fn new(
        config: &TrackerConfig,
        estimator: SavingsEstimator,
        converter: EquivalenceConverter,
        clock: C,
        display: D,
    ) -> Self {
        Self {
            estimator,
            converter,
            clock,
            display,
            offset: TimeOffset::Now,
            timeframe: Timeframe::default(),
            animate: true,
            tick_task: PeriodicTask::every_ms(config.tick_interval_ms),
            frame_task: PeriodicTask::every_ms(config.frame_interval_ms),
            published_savings: None,
            last_snapshot: None,
        }
    }

    pub fn with_animation(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    pub fn with_timeframe(mut self, timeframe: Timeframe) -> Self {
        self.timeframe = timeframe;
        self
    }

    pub fn estimator(&self) -> &SavingsEstimator {
        &self.estimator
    }

    pub fn converter(&self) -> &EquivalenceConverter {
        &self.converter
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn offset(&self) -> TimeOffset {
        self.offset
    }

    pub fn last_snapshot(&self) -> Option<&DashboardSnapshot> {
        self.last_snapshot.as_ref()
    }

    pub fn snapshot_at(&self, now: Timestamp) -> DashboardSnapshot {
        DashboardSnapshot::build(&self.estimator, &self.converter, now, self.offset, self.timeframe)
    }

    /// One tick: recompute every slot from the clock and publish the savings value.
    pub fn tick(&mut self) -> &DashboardSnapshot {
        let _timing = logging::start_timing("tick", OperationCategory::Tick);

        let now = self.clock.now();
        let snapshot = self.snapshot_at(now);
        debug!(savings = snapshot.savings_tons, %now, "tick");

        self.published_savings = Some(snapshot.savings_tons);
        self.display.render_snapshot(&snapshot);
        self.last_snapshot.insert(snapshot)
    }

    /// One animation frame: start transitions toward any newly published value,
    /// then advance them.
    pub fn frame(&mut self) {
        let now = self.clock.now();
        if let Some(savings) = self.published_savings.take() {
            self.converter.begin_transitions(savings, now);
        }
        let frame = self.converter.advance_frame(&now);
        if !frame.is_empty() {
            self.display.render_frame(&frame);
        }
    }

    /// Highlights another equivalent and refreshes the display immediately.
    /// Unknown keys change nothing.
    pub fn select_equivalent(&mut self, key: &str) -> &DashboardSnapshot {
        self.converter.select(key);
        self.refresh()
    }

    /// Switches the projection offset; missing or unknown selections mean "now".
    pub fn set_time_offset(&mut self, selection: Option<&str>) -> &DashboardSnapshot {
        self.offset = TimeOffset::from_selection(selection);
        self.refresh()
    }

    pub fn notify(&mut self, notice: &str) {
        self.display.show_notice(notice);
    }

    pub fn finish(&mut self) {
        self.display.finish();
    }

    fn refresh(&mut self) -> &DashboardSnapshot {
        let snapshot = self.snapshot_at(self.clock.now());
        self.display.render_snapshot(&snapshot);
        self.last_snapshot.insert(snapshot)
    }

    /// Runs both tasks until `max_ticks` ticks have happened (forever when `None`)
    /// and any in-flight animation has settled. Returns the number of ticks run.
    pub fn run(&mut self, max_ticks: Option<u64>) -> u64 {
        info!(offset = %self.offset, selected = %self.converter.selected(), "starting live counter");
        let mut ticks = 0u64;

        loop {
            let now = self.clock.now();
            let ticks_done = max_ticks.map_or(false, |max| ticks >= max);

            if !ticks_done && self.tick_task.poll(&now) {
                self.tick();
                ticks += 1;
            }
            if self.animate && self.frame_task.poll(&now) {
                self.frame();
            }

            let finished = max_ticks.map_or(false, |max| ticks >= max);
            if finished && (!self.animate || (self.published_savings.is_none() && !self.converter.has_active_transitions())) {
                break;
            }

            // Once ticking is done only the frame task is still scheduled
            let wait = match (self.animate, finished) {
                (true, true) => self.frame_task.until_due(&now),
                (true, false) => self.tick_task.until_due(&now).min(self.frame_task.until_due(&now)),
                (false, _) => self.tick_task.until_due(&now),
            };
            if let Ok(wait) = wait.to_std() {
                self.clock.sleep(wait);
            }
        }

        self.finish();
        info!(ticks, "live counter stopped");
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::const_funcs::parse_reference_time;
    use crate::models::equivalent::EquivalentKind;
    use crate::utils::traits::FixedClock;
    use std::cell::Cell;

    #[derive(Default)]
    struct RecordingDisplay {
        snapshots: Vec<DashboardSnapshot>,
        frames: Vec<Vec<(EquivalentKind, String)>>,
        notices: Vec<String>,
        finished: bool,
    }

    impl DisplaySink for RecordingDisplay {
        fn render_snapshot(&mut self, snapshot: &DashboardSnapshot) {
            self.snapshots.push(snapshot.clone());
        }

        fn render_frame(&mut self, frame: &[(EquivalentKind, String)]) {
            self.frames.push(frame.to_vec());
        }

        fn show_notice(&mut self, notice: &str) {
            self.notices.push(notice.to_string());
        }

        fn finish(&mut self) {
            self.finished = true;
        }
    }

    fn counter(at: &str) -> LiveCounter<FixedClock, RecordingDisplay> {
        let config = TrackerConfig::compiled().unwrap();
        LiveCounter::new(
            &config,
            SavingsEstimator::new(&config),
            EquivalenceConverter::from_config(&config),
            FixedClock::new(parse_reference_time(at).unwrap()),
            RecordingDisplay::default(),
        )
    }

    #[test]
    fn test_periodic_task_polling() {
        let mut task = PeriodicTask::every_ms(1000);
        let t0 = parse_reference_time("2025-11-08T00:00:00-05:00").unwrap();
        assert!(task.poll(&t0));
        assert!(!task.poll(&(t0 + Duration::milliseconds(999))));
        assert_eq!(task.until_due(&(t0 + Duration::milliseconds(400))), Duration::milliseconds(600));
        assert!(task.poll(&(t0 + Duration::milliseconds(1000))));
    }

    #[test]
    fn test_run_ticks_once_per_second() {
        let mut counter = counter("2025-11-08T06:00:00-05:00").with_animation(false);
        let ticks = counter.run(Some(3));

        assert_eq!(ticks, 3);
        let snapshots = &counter.display().snapshots;
        assert_eq!(snapshots.len(), 3);
        let times: Vec<String> = snapshots.iter().map(|s| s.generated_at.to_rfc3339()).collect();
        assert_eq!(times, vec![
            "2025-11-08T06:00:00-05:00",
            "2025-11-08T06:00:01-05:00",
            "2025-11-08T06:00:02-05:00",
        ]);
        assert!(snapshots[2].savings_tons > snapshots[0].savings_tons);
        assert!(counter.display().frames.is_empty());
        assert!(counter.display().finished);
    }

    #[test]
    fn test_animation_settles_on_published_value() {
        let mut counter = counter("2025-11-08T06:00:00-05:00");
        counter.run(Some(2));
        assert!(!counter.converter().has_active_transitions());

        let display = counter.display();
        assert!(!display.frames.is_empty());
        let last_snapshot = display.snapshots.last().unwrap();
        let expected = &last_snapshot.equivalents[&EquivalentKind::Trees];
        assert_eq!(counter.converter().last_displayed(EquivalentKind::Trees), expected.value);

        let last_frame = display.frames.last().unwrap();
        let trees = last_frame.iter().find(|(k, _)| *k == EquivalentKind::Trees).unwrap();
        assert_eq!(trees.1, expected.formatted);
    }

    /// Fixed clock that fails the test instead of spinning on zero-length sleeps.
    struct NoSpinClock {
        inner: FixedClock,
        idle_sleeps: Cell<u32>,
    }

    impl Clock for NoSpinClock {
        fn now(&self) -> Timestamp {
            self.inner.now()
        }

        fn sleep(&self, duration: std::time::Duration) {
            if duration.is_zero() {
                self.idle_sleeps.set(self.idle_sleeps.get() + 1);
                assert!(self.idle_sleeps.get() < 1000, "run loop stalled at {}", self.inner.now());
            }
            self.inner.sleep(duration);
        }
    }

    #[test]
    fn test_bounded_run_always_advances_the_clock() {
        let config = TrackerConfig::compiled().unwrap();
        let start = parse_reference_time("2025-11-08T06:00:00-05:00").unwrap();
        let clock = NoSpinClock { inner: FixedClock::new(start), idle_sleeps: Cell::new(0) };
        let mut counter = LiveCounter::new(
            &config,
            SavingsEstimator::new(&config),
            EquivalenceConverter::from_config(&config),
            clock,
            RecordingDisplay::default(),
        );

        assert_eq!(counter.run(Some(2)), 2);
        assert!(!counter.converter().has_active_transitions());
        assert!(counter.display().finished);
    }

    #[test]
    fn test_selection_and_offset_refresh_synchronously() {
        let mut counter = counter("2025-11-20T12:00:00-05:00");

        let snapshot = counter.select_equivalent("smartphones");
        assert_eq!(snapshot.selected_equivalent, EquivalentKind::Smartphones);

        let snapshot = counter.select_equivalent("unicorns");
        assert_eq!(snapshot.selected_equivalent, EquivalentKind::Smartphones);

        let week = counter.set_time_offset(Some("1week")).future.total_tons;
        let now = counter.set_time_offset(Some("someday")).future.total_tons;
        assert_eq!(counter.offset(), TimeOffset::Now);
        assert!(week > now);
        assert_eq!(counter.display().snapshots.len(), 4);
    }

    #[test]
    fn test_notice_and_finish_reach_display() {
        let mut counter = counter("2025-11-20T12:00:00-05:00");
        counter.notify("Link Copied!");
        counter.finish();
        assert_eq!(counter.display().notices, vec!["Link Copied!"]);
        assert!(counter.display().finished);
        assert!(counter.last_snapshot().is_none());
    }
}
