//! Presentation loop for the folio terminal portfolio.
//!
//! Everything here runs on one thread against a virtual clock: the host
//! calls [`PresentationLoop::advance_to`] with the time elapsed since mount
//! and the loop fires whatever timers fell due, in order. Renderers read
//! [`Snapshot`]s and never touch the loop's internals.

mod clock;
mod presentation;
mod scheduler;
mod snapshot;
mod typewriter;

pub use clock::{Clock, ClockReading, FixedTimeSource, SystemTimeSource, TimeSource};
pub use presentation::{LoopSettings, PresentationLoop};
pub use scheduler::{Scheduler, TimerId, TimerKind};
pub use snapshot::{Snapshot, SubscriptionId, TerminalSnapshot};
pub use typewriter::{PROMPT, PROMPT_MARKER, Typewriter, TypewriterState};
