//! Virtual-time timer scheduler.
//!
//! Timers are owned resources: acquiring one returns a [`TimerId`] that stays
//! valid until it is released. Periodic timers re-arm from their previous due
//! time so they do not drift; one-shot timers disarm after firing and can be
//! re-armed, which is how chained delays are expressed.

use std::time::Duration;

use tracing::debug;

/// Handle to a timer acquired from a [`Scheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Firing behaviour of a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Fires every period.
    Interval(Duration),
    /// Fires once per arming.
    Once,
}

#[derive(Debug, Clone)]
struct Timer {
    id: TimerId,
    kind: TimerKind,
    /// Next firing time; `None` while a one-shot is disarmed.
    due: Option<Duration>,
}

/// Single-threaded scheduler over elapsed time since creation.
#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_id: u64,
    timers: Vec<Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Acquire a periodic timer whose first firing is one period from now.
    ///
    /// Zero periods are raised to one nanosecond.
    pub fn every(&mut self, period: Duration) -> TimerId {
        let period = period.max(Duration::from_nanos(1));
        let due = self.now + period;
        self.acquire(TimerKind::Interval(period), due)
    }

    /// Acquire a one-shot timer armed to fire after `delay`.
    pub fn once(&mut self, delay: Duration) -> TimerId {
        let due = self.now + delay;
        self.acquire(TimerKind::Once, due)
    }

    fn acquire(&mut self, kind: TimerKind, due: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        debug!(timer = id.0, ?kind, ?due, "timer acquired");
        self.timers.push(Timer {
            id,
            kind,
            due: Some(due),
        });
        id
    }

    /// Arm (or re-arm) a timer to fire `delay` after `from`.
    ///
    /// Returns `false` if the timer has been released.
    pub fn arm_at(&mut self, id: TimerId, from: Duration, delay: Duration) -> bool {
        match self.timers.iter_mut().find(|t| t.id == id) {
            Some(timer) => {
                timer.due = Some(from + delay);
                true
            }
            None => false,
        }
    }

    /// Arm (or re-arm) a timer to fire `delay` from now.
    pub fn arm(&mut self, id: TimerId, delay: Duration) -> bool {
        self.arm_at(id, self.now, delay)
    }

    /// Cancel any pending firing without releasing the timer.
    pub fn disarm(&mut self, id: TimerId) -> bool {
        match self.timers.iter_mut().find(|t| t.id == id) {
            Some(timer) => {
                timer.due = None;
                true
            }
            None => false,
        }
    }

    /// Release a timer; its pending firing, if any, is dropped.
    pub fn release(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        let released = self.timers.len() != before;
        if released {
            debug!(timer = id.0, "timer released");
        }
        released
    }

    /// Whether the timer is still held.
    pub fn is_acquired(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Whether the timer is held and has a pending firing.
    pub fn is_armed(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id && t.due.is_some())
    }

    /// Number of held timers.
    pub fn acquired(&self) -> usize {
        self.timers.len()
    }

    /// Earliest pending firing time.
    pub fn next_due(&self) -> Option<Duration> {
        self.timers.iter().filter_map(|t| t.due).min()
    }

    /// Fire the earliest timer due at or before `until`.
    ///
    /// Advances the virtual clock to the firing time and returns the timer
    /// with that time. Ties go to the timer acquired first.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerId, Duration)> {
        let timer = self
            .timers
            .iter_mut()
            .filter(|t| t.due.is_some_and(|due| due <= until))
            .min_by_key(|t| (t.due, t.id))?;

        let due = timer.due?;
        timer.due = match timer.kind {
            TimerKind::Interval(period) => Some(due + period),
            TimerKind::Once => None,
        };
        self.now = self.now.max(due);
        Some((timer.id, due))
    }

    /// Move the clock forward without firing anything.
    ///
    /// Callers drain [`Scheduler::pop_due`] first; the clock never moves back.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn drain(s: &mut Scheduler, until: Duration) -> Vec<(TimerId, Duration)> {
        let mut fired = Vec::new();
        while let Some(f) = s.pop_due(until) {
            fired.push(f);
        }
        s.settle(until);
        fired
    }

    #[test]
    fn test_interval_fires_without_drift() {
        let mut s = Scheduler::new();
        let id = s.every(ms(50));
        let fired = drain(&mut s, ms(170));
        assert_eq!(fired, vec![(id, ms(50)), (id, ms(100)), (id, ms(150))]);
        assert_eq!(s.now(), ms(170));
        assert_eq!(s.next_due(), Some(ms(200)));
    }

    #[test]
    fn test_timers_fire_in_time_order_then_acquisition_order() {
        let mut s = Scheduler::new();
        let slow = s.every(ms(100));
        let fast = s.every(ms(50));
        let fired: Vec<TimerId> = drain(&mut s, ms(100)).into_iter().map(|(id, _)| id).collect();
        assert_eq!(fired, vec![fast, slow, fast]);
    }

    #[test]
    fn test_once_disarms_after_firing_and_can_be_rearmed() {
        let mut s = Scheduler::new();
        let id = s.once(ms(10));
        assert_eq!(drain(&mut s, ms(30)), vec![(id, ms(10))]);
        assert!(s.is_acquired(id));
        assert!(!s.is_armed(id));

        assert!(s.arm_at(id, ms(10), ms(40)));
        assert_eq!(drain(&mut s, ms(100)), vec![(id, ms(50))]);
    }

    #[test]
    fn test_release_drops_pending_firing() {
        let mut s = Scheduler::new();
        let id = s.once(ms(10));
        assert!(s.release(id));
        assert!(drain(&mut s, ms(100)).is_empty());
        assert!(!s.release(id));
        assert!(!s.arm(id, ms(5)));
    }

    #[test]
    fn test_disarm_keeps_timer_acquired() {
        let mut s = Scheduler::new();
        let id = s.every(ms(10));
        assert!(s.disarm(id));
        assert!(s.is_acquired(id));
        assert!(drain(&mut s, ms(100)).is_empty());
    }

    #[test]
    fn test_zero_period_does_not_spin_forever() {
        let mut s = Scheduler::new();
        s.every(Duration::ZERO);
        let fired = drain(&mut s, Duration::from_nanos(3));
        assert_eq!(fired.len(), 3);
    }
}
