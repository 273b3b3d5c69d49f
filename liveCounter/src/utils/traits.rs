// Seams between the tick loop and its environment: time source and display surface

use chrono::{Duration, Utc};
use std::cell::Cell;
use std::time::Instant;
use crate::analysis::snapshot::DashboardSnapshot;
use crate::config::const_funcs::{to_reference_zone, Timestamp};
use crate::models::equivalent::EquivalentKind;

pub trait Clock {
    fn now(&self) -> Timestamp;
    fn sleep(&self, duration: std::time::Duration);
}

/// Wall clock in the reference zone.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        to_reference_zone(&Utc::now())
    }

    fn sleep(&self, duration: std::time::Duration) {
        std::thread::sleep(duration);
    }
}

/// Real-time clock that starts at a chosen instant instead of "now".
pub struct OffsetClock {
    origin: Timestamp,
    started: Instant,
}

impl OffsetClock {
    pub fn starting_at(origin: Timestamp) -> Self {
        Self { origin, started: Instant::now() }
    }
}

impl Clock for OffsetClock {
    fn now(&self) -> Timestamp {
        let elapsed = Duration::from_std(self.started.elapsed()).unwrap_or_else(|_| Duration::zero());
        self.origin + elapsed
    }

    fn sleep(&self, duration: std::time::Duration) {
        std::thread::sleep(duration);
    }
}

/// Manually driven clock; sleeping advances it instantly.
pub struct FixedClock {
    now: Cell<Timestamp>,
}

impl FixedClock {
    pub fn new(now: Timestamp) -> Self {
        Self { now: Cell::new(now) }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.now.get()
    }

    fn sleep(&self, duration: std::time::Duration) {
        self.advance(Duration::from_std(duration).unwrap_or_else(|_| Duration::zero()));
    }
}

/// Presentation surface fed by the live counter.
pub trait DisplaySink {
    fn render_snapshot(&mut self, snapshot: &DashboardSnapshot);
    fn render_frame(&mut self, frame: &[(EquivalentKind, String)]);
    fn show_notice(&mut self, notice: &str);
    fn finish(&mut self) {}
}
