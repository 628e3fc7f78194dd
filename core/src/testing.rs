//! Test doubles for driving a tracker without a game server.
//!
//! - [`ManualClock`]: a clock that only moves when told to
//! - [`RecordingSink`]: a [`NotificationSink`] that records every UI call
//!
//! Both are cheap to clone and share state between clones, so a test can
//! hand one copy to a tracker (or a running service) and inspect the other.
//!
//! ```
//! use std::time::Duration;
//! use damage_display_core::testing::{ManualClock, RecordingSink, UiCall};
//! use damage_display_core::{ActorId, DamageTracker, TrackerSettings};
//!
//! let clock = ManualClock::new();
//! let sink = RecordingSink::new();
//! let mut tracker =
//!     DamageTracker::with_clock(TrackerSettings::default(), sink.clone(), clock.clone());
//!
//! tracker.credit(ActorId(1), 10.0);
//! clock.advance(Duration::from_secs(4));
//! assert_eq!(tracker.sweep(), 1);
//! assert!(matches!(sink.calls().last(), Some(UiCall::Close { .. })));
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::actor::ActorId;
use crate::clock::Clock;
use crate::notify::NotificationSink;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A clock frozen at its creation instant until advanced.
#[derive(Debug, Clone)]
pub struct ManualClock {
    start: Instant,
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        let start = Instant::now();
        Self {
            start,
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// The instant the clock was created at.
    pub fn start(&self) -> Instant {
        self.start
    }

    pub fn advance(&self, by: Duration) {
        let mut now = lock(&self.now);
        *now += by;
    }

    /// Jump to `start + offset`.
    pub fn set_elapsed(&self, offset: Duration) {
        *lock(&self.now) = self.start + offset;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *lock(&self.now)
    }
}

/// One call made to the host UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCall {
    Open {
        channel_id: u16,
        slot: i16,
        recipient: ActorId,
    },
    SetText {
        slot: i16,
        recipient: ActorId,
        element: String,
        text: String,
    },
    Close {
        channel_id: u16,
        recipient: ActorId,
    },
}

/// Records UI calls in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    calls: Arc<Mutex<Vec<UiCall>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<UiCall> {
        lock(&self.calls).clone()
    }

    /// Drain the recorded calls.
    pub fn take(&self) -> Vec<UiCall> {
        std::mem::take(&mut *lock(&self.calls))
    }

    /// Texts pushed to `recipient`, oldest first.
    pub fn texts_for(&self, recipient: ActorId) -> Vec<String> {
        lock(&self.calls)
            .iter()
            .filter_map(|call| match call {
                UiCall::SetText {
                    recipient: r, text, ..
                } if *r == recipient => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn opens_for(&self, recipient: ActorId) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|call| matches!(call, UiCall::Open { recipient: r, .. } if *r == recipient))
            .count()
    }

    pub fn closes_for(&self, recipient: ActorId) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|call| matches!(call, UiCall::Close { recipient: r, .. } if *r == recipient))
            .count()
    }
}

impl NotificationSink for RecordingSink {
    fn open_channel(&mut self, channel_id: u16, slot: i16, recipient: ActorId) {
        lock(&self.calls).push(UiCall::Open {
            channel_id,
            slot,
            recipient,
        });
    }

    fn set_channel_text(&mut self, slot: i16, recipient: ActorId, element: &str, text: &str) {
        lock(&self.calls).push(UiCall::SetText {
            slot,
            recipient,
            element: element.to_string(),
            text: text.to_string(),
        });
    }

    fn close_channel(&mut self, channel_id: u16, recipient: ActorId) {
        lock(&self.calls).push(UiCall::Close {
            channel_id,
            recipient,
        });
    }
}
