//! Calendar configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SlotCalError, SlotCalResult};

/// Behavior switches for a `Calendar`, usually read from a TOML file:
///
/// ```toml
/// allow_past_dates = false
/// reject_empty_ranges = false
/// prune_empty_days = false
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// Accept events dated before today
    pub allow_past_dates: bool,
    /// Reject events whose start is not before their end (off: such events book no slots)
    pub reject_empty_ranges: bool,
    /// Drop days with no booked slot after an event leaves them
    pub prune_empty_days: bool,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        CalendarConfig {
            allow_past_dates: false,
            reject_empty_ranges: false,
            prune_empty_days: false,
        }
    }
}

impl CalendarConfig {
    pub fn from_toml_str(content: &str) -> SlotCalResult<Self> {
        toml::from_str(content).map_err(|e| SlotCalError::Config(e.to_string()))
    }

    /// Load config from `path`, falling back to defaults if the file doesn't exist.
    pub fn load(path: &Path) -> SlotCalResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml_str(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> SlotCalResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| SlotCalError::Config(e.to_string()))?;

        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_use_defaults() {
        let config = CalendarConfig::from_toml_str("prune_empty_days = true").unwrap();
        assert!(config.prune_empty_days);
        assert!(!config.reject_empty_ranges);
        assert!(!config.allow_past_dates);
    }

    #[test]
    fn bad_toml_is_a_config_error() {
        let err = CalendarConfig::from_toml_str("allow_past_dates = \"yes\"").unwrap_err();
        assert!(matches!(err, SlotCalError::Config(_)));
    }

    #[test]
    fn load_missing_file_gives_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = CalendarConfig::load(&dir.path().join("slotcal.toml")).unwrap();
        assert_eq!(config, CalendarConfig::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf/slotcal.toml");
        let config = CalendarConfig {
            allow_past_dates: true,
            ..CalendarConfig::default()
        };

        config.save(&path).unwrap();
        assert_eq!(CalendarConfig::load(&path).unwrap(), config);
    }
}
