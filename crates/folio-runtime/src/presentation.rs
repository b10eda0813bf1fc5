//! The presentation loop: owns the decoration state and the timers that move it.

use std::time::Duration;

use folio_background::{Field, FieldSettings};
use folio_core::{CursorState, CursorVariant, ParseCursorVariantError, Viewport, defaults};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::clock::{Clock, TimeSource};
use crate::scheduler::{Scheduler, TimerId};
use crate::snapshot::{Snapshot, SubscriptionId, Subscribers, TerminalSnapshot};
use crate::typewriter::{Typewriter, TypewriterState};

/// Everything needed to mount a [`PresentationLoop`].
#[derive(Debug, Clone, PartialEq)]
pub struct LoopSettings {
    pub viewport: Viewport,
    pub field: FieldSettings,
    /// Seed for all decoration randomness; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Background tick period.
    pub tick: Duration,
    /// Clock refresh period.
    pub clock: Duration,
    pub char_delay: Duration,
    pub command_pause: Duration,
    /// Delay between mount (or restart) and the first prompt.
    pub typewriter_start: Duration,
    pub commands: Vec<String>,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            field: FieldSettings::default(),
            seed: None,
            tick: Duration::from_millis(defaults::TICK_MS),
            clock: Duration::from_millis(defaults::CLOCK_MS),
            char_delay: Duration::from_millis(defaults::CHAR_DELAY_MS),
            command_pause: Duration::from_millis(defaults::COMMAND_PAUSE_MS),
            typewriter_start: Duration::from_millis(defaults::TYPEWRITER_START_MS),
            commands: defaults::COMMANDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// The three timer resources held while mounted.
#[derive(Debug, Clone, Copy)]
struct LoopTimers {
    tick: TimerId,
    clock: TimerId,
    typewriter: TimerId,
}

/// Timer-driven owner of the particle field, snippets, clock, cursor and
/// terminal buffer.
///
/// Mounting acquires the timers; [`PresentationLoop::dispose`] (or dropping
/// the loop) releases them. A disposed loop ignores every mutation.
#[derive(Debug)]
pub struct PresentationLoop {
    settings: LoopSettings,
    scheduler: Scheduler,
    timers: Option<LoopTimers>,
    field: Field,
    cursor: CursorState,
    typewriter: Typewriter,
    clock: Clock,
    time_source: Box<dyn TimeSource>,
    subscribers: Subscribers,
}

impl PresentationLoop {
    /// Populate the decorations and acquire the timers.
    pub fn mount(settings: LoopSettings, time_source: Box<dyn TimeSource>) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let field = Field::initialize(settings.viewport, settings.field.clone(), rng);
        let typewriter = Typewriter::new(
            &settings.commands,
            settings.char_delay,
            settings.command_pause,
        );
        let clock = Clock::new(time_source.now());

        let mut scheduler = Scheduler::new();
        let timers = LoopTimers {
            tick: scheduler.every(settings.tick),
            clock: scheduler.every(settings.clock),
            typewriter: scheduler.once(settings.typewriter_start),
        };

        info!(
            width = settings.viewport.width,
            height = settings.viewport.height,
            particles = field.particles().len(),
            lines = field.lines().len(),
            "presentation loop mounted"
        );

        Self {
            settings,
            scheduler,
            timers: Some(timers),
            field,
            cursor: CursorState::default(),
            typewriter,
            clock,
            time_source,
            subscribers: Subscribers::default(),
        }
    }

    /// Fire every timer due up to `elapsed` (time since mount), in order.
    ///
    /// Subscribers are notified once if anything fired.
    pub fn advance_to(&mut self, elapsed: Duration) {
        let Some(timers) = self.timers else {
            return;
        };

        let mut changed = false;
        while let Some((id, due)) = self.scheduler.pop_due(elapsed) {
            changed = true;
            if id == timers.tick {
                self.field.tick();
            } else if id == timers.clock {
                self.clock.refresh(self.time_source.as_ref());
            } else if id == timers.typewriter {
                self.fire_typewriter(timers.typewriter, due);
            }
        }
        self.scheduler.settle(elapsed);

        if changed {
            self.emit();
        }
    }

    /// Advance by `delta` from the current virtual time.
    pub fn advance(&mut self, delta: Duration) {
        let target = self.scheduler.now() + delta;
        self.advance_to(target);
    }

    fn fire_typewriter(&mut self, timer: TimerId, due: Duration) {
        let next = if self.typewriter.state() == TypewriterState::Idle {
            self.typewriter.start()
        } else {
            self.typewriter.step()
        };
        if let Some(delay) = next {
            self.scheduler.arm_at(timer, due, delay);
        }
    }

    /// Move every particle and snippet by one tick.
    pub fn tick(&mut self) {
        if self.is_disposed() {
            return;
        }
        self.field.tick();
        self.emit();
    }

    /// Take a fresh clock reading now, outside the periodic refresh.
    pub fn refresh_clock(&mut self) {
        if self.is_disposed() {
            return;
        }
        self.clock.refresh(self.time_source.as_ref());
        self.emit();
    }

    /// Record the latest pointer position verbatim.
    pub fn track_pointer(&mut self, x: f32, y: f32) {
        if self.is_disposed() {
            return;
        }
        self.cursor.x = x;
        self.cursor.y = y;
        self.emit();
    }

    pub fn set_cursor_variant(&mut self, variant: CursorVariant) {
        if self.is_disposed() || self.cursor.variant == variant {
            return;
        }
        self.cursor.variant = variant;
        self.emit();
    }

    /// Set the cursor variant by name; unknown names are rejected and leave
    /// the cursor untouched.
    pub fn set_cursor_variant_named(&mut self, name: &str) -> Result<(), ParseCursorVariantError> {
        let variant = name.parse()?;
        self.set_cursor_variant(variant);
        Ok(())
    }

    /// Pointer left an interactive region.
    pub fn clear_cursor_variant(&mut self) {
        self.set_cursor_variant(CursorVariant::Default);
    }

    /// Adopt new viewport bounds; element counts do not change.
    pub fn resize(&mut self, width: f32, height: f32) {
        if self.is_disposed() {
            return;
        }
        let viewport = Viewport::new(width, height);
        if viewport != self.field.viewport() {
            debug!(width, height, "viewport resized");
            self.field.resize(viewport);
            self.emit();
        }
    }

    /// Type `commands` from the start right away, abandoning any run in
    /// progress.
    pub fn run_typewriter<I, S>(&mut self, commands: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let Some(timers) = self.timers else {
            return;
        };
        self.typewriter =
            Typewriter::new(commands, self.settings.char_delay, self.settings.command_pause);
        match self.typewriter.start() {
            Some(delay) => self.scheduler.arm(timers.typewriter, delay),
            None => self.scheduler.disarm(timers.typewriter),
        };
        self.emit();
    }

    /// Clear the terminal and replay the configured commands after the
    /// start delay.
    pub fn restart_typewriter(&mut self) {
        let Some(timers) = self.timers else {
            return;
        };
        debug!("typewriter restarted");
        self.typewriter = Typewriter::new(
            &self.settings.commands,
            self.settings.char_delay,
            self.settings.command_pause,
        );
        self.scheduler
            .arm(timers.typewriter, self.settings.typewriter_start);
        self.emit();
    }

    /// Stop typing where it is. Returns whether a step was pending.
    pub fn cancel_typewriter(&mut self) -> bool {
        let Some(timers) = self.timers else {
            return false;
        };
        let pending = self.scheduler.is_armed(timers.typewriter);
        self.scheduler.disarm(timers.typewriter);
        if pending {
            debug!(state = ?self.typewriter.state(), "typewriter cancelled");
        }
        pending
    }

    /// Release every timer and drop all subscribers.
    pub fn dispose(&mut self) {
        let Some(timers) = self.timers.take() else {
            return;
        };
        self.scheduler.release(timers.tick);
        self.scheduler.release(timers.clock);
        self.scheduler.release(timers.typewriter);
        self.subscribers.clear();
        info!("presentation loop disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.timers.is_none()
    }

    /// Number of timers currently held.
    pub fn active_timers(&self) -> usize {
        self.scheduler.acquired()
    }

    /// Virtual time since mount.
    pub fn elapsed(&self) -> Duration {
        self.scheduler.now()
    }

    /// Next time anything is due, for sizing the host's poll timeout.
    pub fn next_due(&self) -> Option<Duration> {
        self.scheduler.next_due()
    }

    pub fn settings(&self) -> &LoopSettings {
        &self.settings
    }

    /// Call `callback` with a fresh snapshot after every state change.
    pub fn subscribe(&mut self, callback: impl FnMut(&Snapshot) + 'static) -> SubscriptionId {
        self.subscribers.add(Box::new(callback))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id)
    }

    /// Current state as an owned, immutable value.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            elapsed: self.scheduler.now(),
            viewport: self.field.viewport(),
            particles: self.field.particles().to_vec(),
            lines: self.field.lines().to_vec(),
            cursor: self.cursor,
            clock: self.clock.reading(),
            terminal: TerminalSnapshot {
                text: self.typewriter.buffer().to_string(),
                typing: self.typewriter.is_typing(),
                state: self.typewriter.state(),
            },
        }
    }

    fn emit(&mut self) {
        if self.subscribers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        self.subscribers.notify(&snapshot);
    }
}

impl Drop for PresentationLoop {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use chrono::{DateTime, FixedOffset, TimeZone};

    use super::*;
    use crate::clock::FixedTimeSource;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn epoch() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 1, 1, 12, 0, 0)
            .unwrap()
    }

    fn mount(settings: LoopSettings) -> PresentationLoop {
        PresentationLoop::mount(settings, Box::new(FixedTimeSource(epoch())))
    }

    fn settings() -> LoopSettings {
        LoopSettings {
            seed: Some(42),
            ..LoopSettings::default()
        }
    }

    #[test]
    fn test_mount_acquires_three_timers() {
        let lp = mount(settings());
        assert_eq!(lp.active_timers(), 3);
        let snap = lp.snapshot();
        assert_eq!(snap.particles.len(), 50);
        assert_eq!(snap.lines.len(), 8);
        assert_eq!(snap.terminal.state, TypewriterState::Idle);
        assert_eq!(snap.terminal.text, "");
    }

    #[test]
    fn test_background_ticks_follow_period() {
        let mut lp = mount(settings());
        let before = lp.snapshot();
        lp.advance_to(ms(49));
        assert_eq!(lp.snapshot().particles, before.particles);
        lp.advance_to(ms(50));
        assert_ne!(lp.snapshot().particles, before.particles);
    }

    #[test]
    fn test_explicit_tick_matches_timer_tick() {
        let mut by_timer = mount(settings());
        let mut by_hand = mount(settings());
        by_timer.advance_to(ms(150));
        by_hand.tick();
        by_hand.tick();
        by_hand.tick();
        assert_eq!(by_timer.snapshot().particles, by_hand.snapshot().particles);
        assert_eq!(by_timer.snapshot().lines, by_hand.snapshot().lines);
    }

    #[test]
    fn test_typewriter_waits_for_start_delay() {
        let mut lp = mount(settings());
        lp.advance_to(ms(1999));
        assert_eq!(lp.snapshot().terminal.text, "");
        lp.advance_to(ms(2000));
        let term = lp.snapshot().terminal;
        assert_eq!(term.text, "$ ");
        assert!(term.typing);
        lp.advance_to(ms(2050));
        assert_eq!(lp.snapshot().terminal.text, "$ s");
    }

    #[test]
    fn test_pointer_and_variant() {
        let mut lp = mount(settings());
        lp.track_pointer(123.5, 42.0);
        lp.set_cursor_variant(CursorVariant::CodeFocus);
        let cursor = lp.snapshot().cursor;
        assert_eq!((cursor.x, cursor.y), (123.5, 42.0));
        assert_eq!(cursor.variant, CursorVariant::CodeFocus);

        lp.clear_cursor_variant();
        assert_eq!(lp.snapshot().cursor.variant, CursorVariant::Default);
    }

    #[test]
    fn test_unknown_variant_name_is_rejected_and_ignored() {
        let mut lp = mount(settings());
        lp.set_cursor_variant(CursorVariant::Hover);
        let err = lp.set_cursor_variant_named("glow").unwrap_err();
        assert_eq!(err.name(), "glow");
        assert_eq!(lp.snapshot().cursor.variant, CursorVariant::Hover);

        lp.set_cursor_variant_named("text").unwrap();
        assert_eq!(lp.snapshot().cursor.variant, CursorVariant::TextFocus);
    }

    #[test]
    fn test_subscribers_receive_snapshots() {
        let mut lp = mount(settings());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let id = lp.subscribe(move |s| sink.borrow_mut().push(s.cursor));

        lp.track_pointer(1.0, 2.0);
        lp.advance_to(ms(50));
        assert_eq!(seen.borrow().len(), 2);
        assert_eq!((seen.borrow()[0].x, seen.borrow()[0].y), (1.0, 2.0));

        assert!(lp.unsubscribe(id));
        lp.track_pointer(3.0, 4.0);
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_no_notification_when_nothing_fires() {
        let mut lp = mount(settings());
        let count = Rc::new(RefCell::new(0));
        let sink = count.clone();
        lp.subscribe(move |_| *sink.borrow_mut() += 1);
        lp.advance_to(ms(10));
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn test_clock_refreshes_every_second() {
        #[derive(Debug)]
        struct Ticking(Rc<RefCell<DateTime<FixedOffset>>>);
        impl TimeSource for Ticking {
            fn now(&self) -> DateTime<FixedOffset> {
                *self.0.borrow()
            }
        }

        let time = Rc::new(RefCell::new(epoch()));
        let mut lp = PresentationLoop::mount(settings(), Box::new(Ticking(time.clone())));
        *time.borrow_mut() = epoch() + chrono::Duration::seconds(5);

        lp.advance_to(ms(999));
        assert_eq!(lp.snapshot().clock.uptime_secs, 0);
        lp.advance_to(ms(1000));
        assert_eq!(lp.snapshot().clock.uptime_secs, 5);
    }

    #[test]
    fn test_dispose_releases_timers_and_freezes_state() {
        let mut lp = mount(settings());
        lp.advance_to(ms(2100));
        let frozen = lp.snapshot();

        lp.dispose();
        assert!(lp.is_disposed());
        assert_eq!(lp.active_timers(), 0);

        lp.advance_to(ms(60_000));
        lp.tick();
        lp.track_pointer(5.0, 5.0);
        lp.set_cursor_variant(CursorVariant::Hover);
        lp.resize(10.0, 10.0);
        lp.run_typewriter(["again"]);
        lp.restart_typewriter();
        assert_eq!(lp.snapshot(), frozen);
    }

    #[test]
    fn test_dispose_is_idempotent() {
        let mut lp = mount(settings());
        lp.dispose();
        lp.dispose();
        assert_eq!(lp.active_timers(), 0);
    }

    #[test]
    fn test_restart_resets_and_waits_for_start_delay() {
        let mut lp = mount(settings());
        lp.advance_to(ms(2500));
        assert!(lp.snapshot().terminal.text.len() > 2);

        lp.restart_typewriter();
        let term = lp.snapshot().terminal;
        assert_eq!(term.text, "");
        assert_eq!(term.state, TypewriterState::Idle);

        lp.advance_to(ms(4499));
        assert_eq!(lp.snapshot().terminal.text, "");
        lp.advance_to(ms(4500));
        assert_eq!(lp.snapshot().terminal.text, "$ ");
    }

    #[test]
    fn test_restart_replays_configured_commands_after_adhoc_run() {
        let mut lp = mount(LoopSettings {
            commands: vec!["configured".to_string()],
            ..settings()
        });
        lp.run_typewriter(["adhoc"]);
        lp.advance_to(ms(5000));
        assert_eq!(lp.snapshot().terminal.text, "$ adhoc\n$ ");

        lp.restart_typewriter();
        assert_eq!(lp.snapshot().terminal.state, TypewriterState::Idle);
        lp.advance_to(ms(10_000));
        let term = lp.snapshot().terminal;
        assert_eq!(term.text, "$ configured\n$ ");
        assert_eq!(term.state, TypewriterState::Done);
    }

    #[test]
    fn test_cancel_freezes_buffer() {
        let mut lp = mount(settings());
        lp.advance_to(ms(2100));
        let text = lp.snapshot().terminal.text;
        assert!(lp.cancel_typewriter());
        lp.advance_to(ms(10_000));
        assert_eq!(lp.snapshot().terminal.text, text);
        assert!(!lp.cancel_typewriter());
    }

    #[test]
    fn test_resize_keeps_counts_in_bounds() {
        let mut lp = mount(settings());
        lp.resize(200.0, 100.0);
        lp.advance_to(ms(500));
        let snap = lp.snapshot();
        assert_eq!(snap.viewport, Viewport::new(200.0, 100.0));
        assert_eq!(snap.particles.len(), 50);
        assert!(snap.particles.iter().all(|p| snap.viewport.contains(p.x, p.y)));
    }

    #[test]
    fn test_advance_is_relative_to_virtual_time() {
        let mut a = mount(settings());
        let mut b = mount(settings());
        a.advance_to(ms(120));
        a.advance_to(ms(260));
        b.advance(ms(120));
        b.advance(ms(140));
        assert_eq!(b.elapsed(), ms(260));
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_refresh_clock_outside_period() {
        #[derive(Debug)]
        struct Shared(Rc<RefCell<DateTime<FixedOffset>>>);
        impl TimeSource for Shared {
            fn now(&self) -> DateTime<FixedOffset> {
                *self.0.borrow()
            }
        }

        let time = Rc::new(RefCell::new(epoch()));
        let mut lp = PresentationLoop::mount(settings(), Box::new(Shared(time.clone())));
        *time.borrow_mut() = epoch() + chrono::Duration::seconds(3);
        lp.refresh_clock();
        assert_eq!(lp.snapshot().clock.uptime_secs, 3);
    }

    #[test]
    fn test_clear_cursor_variant_returns_to_default() {
        let mut lp = mount(settings());
        lp.set_cursor_variant(CursorVariant::CodeFocus);
        lp.clear_cursor_variant();
        assert_eq!(lp.snapshot().cursor.variant, CursorVariant::Default);
    }
}
