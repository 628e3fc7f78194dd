use std::time::Duration;

use damage_display_types::DisplayConfig;

use crate::config;
use crate::error::ConfigError;
use crate::notify::ChannelIds;

/// Runtime form of [`DisplayConfig`], with durations resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerSettings {
    /// Inactivity after which a total is cleared.
    pub decay_window: Duration,
    /// Periods below `service::MIN_SWEEP_INTERVAL` are raised to it by the service.
    pub sweep_interval: Duration,
    pub channels: ChannelIds,
    pub text_element: String,
    pub show_secondary_channels: bool,
    pub hidden_by_default: bool,
    pub capacity_hint: usize,
}

impl TrackerSettings {
    pub fn from_config(cfg: &DisplayConfig) -> Result<Self, ConfigError> {
        config::validate(cfg)?;
        Ok(Self {
            decay_window: secs("clear_delay_secs", cfg.clear_delay_secs)?,
            sweep_interval: secs("sweep_interval_secs", cfg.sweep_interval_secs)?,
            channels: ChannelIds::from_base(cfg.channel_base_id),
            text_element: cfg.text_element.clone(),
            show_secondary_channels: cfg.show_secondary_channels,
            hidden_by_default: cfg.notifications_hidden_by_default,
            capacity_hint: cfg.max_participants,
        })
    }
}

impl Default for TrackerSettings {
    fn default() -> Self {
        let cfg = DisplayConfig::default();
        Self {
            decay_window: Duration::from_secs_f32(cfg.clear_delay_secs),
            sweep_interval: Duration::from_secs_f32(cfg.sweep_interval_secs),
            channels: ChannelIds::from_base(cfg.channel_base_id),
            text_element: cfg.text_element,
            show_secondary_channels: cfg.show_secondary_channels,
            hidden_by_default: cfg.notifications_hidden_by_default,
            capacity_hint: cfg.max_participants,
        }
    }
}

fn secs(field: &'static str, value: f32) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f32(value).map_err(|e| ConfigError::Invalid {
        field,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_resolves_durations() {
        let cfg = DisplayConfig {
            clear_delay_secs: 2.5,
            sweep_interval_secs: 1.0,
            notifications_hidden_by_default: true,
            ..DisplayConfig::default()
        };
        let settings = TrackerSettings::from_config(&cfg).unwrap();

        assert_eq!(settings.decay_window, Duration::from_millis(2500));
        assert_eq!(settings.sweep_interval, Duration::from_secs(1));
        assert_eq!(settings.channels.slot, -18525);
        assert!(settings.hidden_by_default);
    }

    #[test]
    fn test_default_matches_default_config() {
        let from_cfg = TrackerSettings::from_config(&DisplayConfig::default()).unwrap();
        assert_eq!(from_cfg, TrackerSettings::default());
    }

    #[test]
    fn test_from_config_rejects_invalid() {
        let cfg = DisplayConfig {
            clear_delay_secs: -1.0,
            ..DisplayConfig::default()
        };
        assert!(TrackerSettings::from_config(&cfg).is_err());
    }
}
