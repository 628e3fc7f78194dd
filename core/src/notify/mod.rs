//! Outbound calls to the host UI layer and per-actor display preferences.

mod preferences;
mod sink;

pub use preferences::NotificationPreferences;
pub use sink::{ChannelIds, NotificationSink};
