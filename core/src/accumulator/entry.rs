use std::time::{Duration, Instant};

/// Snapshot of one actor's running total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccumulatorEntry {
    /// Damage credited since the entry was created. Only ever grows.
    pub total: f64,
    /// Eligible for eviction once `now` is strictly past this.
    pub expires_at: Instant,
}

impl AccumulatorEntry {
    pub fn new(amount: f64, expires_at: Instant) -> Self {
        Self {
            total: amount,
            expires_at,
        }
    }

    /// Add to the total and push the deadline out.
    pub fn refreshed(self, amount: f64, expires_at: Instant) -> Self {
        Self {
            total: self.total + amount,
            expires_at,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at < now
    }

    /// Time left before expiry, zero once passed.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.expires_at.saturating_duration_since(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_is_strict() {
        let t0 = Instant::now();
        let entry = AccumulatorEntry::new(5.0, t0 + Duration::from_secs(3));

        assert!(!entry.is_expired(t0));
        assert!(!entry.is_expired(t0 + Duration::from_secs(3)));
        assert!(entry.is_expired(t0 + Duration::from_millis(3001)));
    }

    #[test]
    fn test_refreshed_accumulates_and_moves_deadline() {
        let t0 = Instant::now();
        let entry = AccumulatorEntry::new(10.0, t0 + Duration::from_secs(3))
            .refreshed(15.0, t0 + Duration::from_secs(5));

        assert_eq!(entry.total, 25.0);
        assert_eq!(entry.expires_at, t0 + Duration::from_secs(5));
        assert_eq!(entry.remaining(t0 + Duration::from_secs(4)), Duration::from_secs(1));
        assert_eq!(entry.remaining(t0 + Duration::from_secs(9)), Duration::ZERO);
    }
}
