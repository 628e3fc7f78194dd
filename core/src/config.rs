//! Configuration loading for the damage counter
//!
//! Config comes from one of two places:
//! - **Explicit file**: a TOML file passed by the host (`load_file`)
//! - **Per-user store**: confy's platform config directory (`load_stored`)
//!
//! Both paths validate before handing the config to the tracker.

use std::fs;
use std::path::Path;

use damage_display_types::DisplayConfig;

use crate::error::ConfigError;

/// Application name used for the confy store.
pub const APP_NAME: &str = "damage-display";

/// Upper bound for any configured duration (one day).
pub const MAX_DURATION_SECS: f32 = 86_400.0;

/// Load and validate a config from a TOML file
pub fn load_file(path: &Path) -> Result<DisplayConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config: DisplayConfig = toml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;

    validate(&config)?;
    Ok(config)
}

/// Save a config to a TOML file
pub fn save_file(path: &Path, config: &DisplayConfig) -> Result<(), ConfigError> {
    let contents = toml::to_string_pretty(config).map_err(|e| ConfigError::Serialize {
        path: path.to_path_buf(),
        source: e,
    })?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    fs::write(path, contents).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Load the per-user config, creating it with defaults on first run
pub fn load_stored() -> Result<DisplayConfig, ConfigError> {
    let config: DisplayConfig = confy::load(APP_NAME, None)?;
    validate(&config)?;
    Ok(config)
}

/// Reject configs the tracker cannot run with.
pub fn validate(config: &DisplayConfig) -> Result<(), ConfigError> {
    check_positive_secs("clear_delay_secs", config.clear_delay_secs)?;
    check_positive_secs("sweep_interval_secs", config.sweep_interval_secs)?;

    if config.text_element.is_empty() {
        return Err(ConfigError::Invalid {
            field: "text_element",
            reason: "must not be empty".to_string(),
        });
    }

    Ok(())
}

fn check_positive_secs(field: &'static str, secs: f32) -> Result<(), ConfigError> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("expected a positive number of seconds, got {secs}"),
        });
    }
    if secs > MAX_DURATION_SECS {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("at most {MAX_DURATION_SECS} seconds allowed, got {secs}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("display.toml");

        let config = DisplayConfig {
            show_secondary_channels: true,
            clear_delay_secs: 4.0,
            ..DisplayConfig::default()
        };

        save_file(&path, &config).unwrap();
        let loaded = load_file(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = load_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "clear_delay_secs = \"soon\"").unwrap();

        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_rejects_non_positive_durations() {
        let config = DisplayConfig {
            sweep_interval_secs: 0.0,
            ..DisplayConfig::default()
        };
        let err = validate(&config).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "sweep_interval_secs",
                ..
            }
        ));

        let config = DisplayConfig {
            clear_delay_secs: f32::NAN,
            ..DisplayConfig::default()
        };
        assert!(validate(&config).is_err());

        let config = DisplayConfig {
            clear_delay_secs: MAX_DURATION_SECS * 2.0,
            ..DisplayConfig::default()
        };
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_empty_text_element() {
        let config = DisplayConfig {
            text_element: String::new(),
            ..DisplayConfig::default()
        };
        assert!(validate(&config).is_err());
    }
}
