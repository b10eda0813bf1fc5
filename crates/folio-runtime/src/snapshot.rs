//! Immutable views of the loop state and their subscribers.

use std::fmt;
use std::time::Duration;

use folio_background::{FloatingLine, Particle};
use folio_core::{CursorState, Viewport};

use crate::clock::ClockReading;
use crate::typewriter::TypewriterState;

/// Terminal panel contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalSnapshot {
    pub text: String,
    /// Between start and completion; drives the blinking caret.
    pub typing: bool,
    pub state: TypewriterState,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Virtual time since mount.
    pub elapsed: Duration,
    pub viewport: Viewport,
    pub particles: Vec<Particle>,
    pub lines: Vec<FloatingLine>,
    pub cursor: CursorState,
    pub clock: ClockReading,
    pub terminal: TerminalSnapshot,
}

/// Handle returned by [`crate::PresentationLoop::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&Snapshot)>;

/// Registered snapshot callbacks.
#[derive(Default)]
pub(crate) struct Subscribers {
    next_id: u64,
    callbacks: Vec<(SubscriptionId, Callback)>,
}

impl Subscribers {
    pub fn add(&mut self, callback: Callback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, callback));
        id
    }

    pub fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(sid, _)| *sid != id);
        self.callbacks.len() != before
    }

    pub fn clear(&mut self) {
        self.callbacks.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub fn notify(&mut self, snapshot: &Snapshot) {
        for (_, callback) in &mut self.callbacks {
            callback(snapshot);
        }
    }
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.callbacks.len())
            .finish()
    }
}
