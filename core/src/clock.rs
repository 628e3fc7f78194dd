//! Time source for expiry bookkeeping.

use std::time::Instant;

/// Supplies the current monotonic time.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Real clock. Reads tokio's clock so paused-time tests drive it too;
/// outside a runtime this is plain `Instant::now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}
