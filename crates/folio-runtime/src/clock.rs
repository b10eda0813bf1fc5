//! Wall clock shown in the hero block.

use std::fmt;

use chrono::{DateTime, FixedOffset, Local};
use folio_core::TimeFormat;

/// Source of the current local time.
pub trait TimeSource: fmt::Debug {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Reads the system clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeSource(pub DateTime<FixedOffset>);

impl TimeSource for FixedTimeSource {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// A value of the clock, as handed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockReading {
    pub now: DateTime<FixedOffset>,
    /// Whole seconds since the loop was mounted.
    pub uptime_secs: u64,
}

impl ClockReading {
    /// Clock line, e.g. `14:03:09 +05:30 // Uptime: 42 seconds`.
    pub fn display(&self, format: TimeFormat) -> String {
        format!(
            "{} {} // Uptime: {} seconds",
            self.now.format(format.pattern()),
            self.now.format("%:z"),
            self.uptime_secs
        )
    }
}

/// Clock refreshed by the presentation loop.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    started: DateTime<FixedOffset>,
    now: DateTime<FixedOffset>,
}

impl Clock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self { started: now, now }
    }

    /// Record a fresh reading from `source`.
    pub fn refresh(&mut self, source: &dyn TimeSource) {
        self.now = source.now();
    }

    pub fn reading(&self) -> ClockReading {
        let uptime = self.now.signed_duration_since(self.started).num_seconds();
        ClockReading {
            now: self.now,
            uptime_secs: uptime.max(0) as u64,
        }
    }
}
