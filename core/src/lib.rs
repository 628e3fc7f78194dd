pub mod accumulator;
pub mod actor;
pub mod clock;
pub mod config;
pub mod error;
pub mod notify;
pub mod service;
pub mod signals;
pub mod testing;
pub mod tracking;

// Re-exports for convenience
pub use accumulator::{AccumulatorEntry, AccumulatorStore, Upsert};
pub use actor::{ActorId, Instigator, Limb, Visibility};
pub use clock::{Clock, SystemClock};
pub use error::{ConfigError, ServiceError};
pub use notify::{ChannelIds, NotificationPreferences, NotificationSink};
pub use service::{EntryStatus, ServiceHandle, ServiceStats, TrackingService};
pub use signals::{DamageSignal, SignalHandler};
pub use tracking::{DamageTracker, TrackerSettings};

pub use damage_display_types::DisplayConfig;
