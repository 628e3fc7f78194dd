//! Rolling damage tracking
//!
//! ```text
//!   DamageSignal ──▶ DamageTracker ──credit──▶ AccumulatorStore
//!                         │                          │
//!                         │ open / set text          │ sweep (timer)
//!                         ▼                          ▼
//!                  NotificationSink ◀──────── close channel
//! ```

mod settings;
pub mod tracker;


pub use settings::TrackerSettings;
pub use tracker::{DamageTracker, MAX_ADJUSTED_HIT, MIN_CREDITED_DAMAGE, adjust_player_damage};
