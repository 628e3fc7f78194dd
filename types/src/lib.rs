//! Shared configuration types for damage-display.
//!
//! Kept free of runtime dependencies so the host glue and the CLI can
//! deserialize the same config without pulling in the tracking engine.

pub mod formatting;

use serde::{Deserialize, Serialize};

/// Effect id of the stock damage counter UI asset.
pub const DEFAULT_CHANNEL_BASE_ID: u16 = 51292;

/// Name of the text element inside the UI asset that shows the total.
pub const DEFAULT_TEXT_ELEMENT: &str = "epicText";

/// Static configuration, loaded once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Also credit structure (barricade) and creature damage.
    pub show_secondary_channels: bool,
    /// Effect id of the notification asset. The per-client slot key is derived from it.
    pub channel_base_id: u16,
    /// Seconds of inactivity after which an actor's total is cleared.
    pub clear_delay_secs: f32,
    /// Seconds between expiry sweeps. Also the delay before the first sweep.
    pub sweep_interval_secs: f32,
    /// When true, players must opt in to see their counter.
    pub notifications_hidden_by_default: bool,
    pub text_element: String,
    /// Capacity hint for the accumulator store (server slot count).
    pub max_participants: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_secondary_channels: false,
            channel_base_id: DEFAULT_CHANNEL_BASE_ID,
            clear_delay_secs: 3.0,
            sweep_interval_secs: 5.0,
            notifications_hidden_by_default: false,
            text_element: DEFAULT_TEXT_ELEMENT.to_string(),
            max_participants: 24,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_plugin() {
        let config = DisplayConfig::default();
        assert_eq!(config.channel_base_id, 51292);
        assert_eq!(config.clear_delay_secs, 3.0);
        assert_eq!(config.sweep_interval_secs, 5.0);
        assert!(!config.show_secondary_channels);
        assert!(!config.notifications_hidden_by_default);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let toml = r#"
show_secondary_channels = true
clear_delay_secs = 4.5
"#;
        let config: DisplayConfig = toml::from_str(toml).unwrap();
        assert!(config.show_secondary_channels);
        assert_eq!(config.clear_delay_secs, 4.5);
        assert_eq!(config.sweep_interval_secs, 5.0);
        assert_eq!(config.text_element, "epicText");
    }
}
