// Settings module
// User-tunable widget configuration, read from settings.toml

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::services::text_fit::FitOptions;

pub const DEFAULT_UPDATE_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_EXPIRED_MESSAGE: &str = "Event has passed";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub countdown: CountdownSettings,
    pub fit: FitOptions,
    pub storage: StorageSettings,
    pub date: DateSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountdownSettings {
    /// Minimum spacing between two recomputations of the display.
    pub update_interval_ms: u64,
    pub expired_message: String,
}

impl Default for CountdownSettings {
    fn default() -> Self {
        Self {
            update_interval_ms: DEFAULT_UPDATE_INTERVAL_MS,
            expired_message: DEFAULT_EXPIRED_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    Json,
    Memory,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    /// Overrides the platform data directory location.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateSettings {
    /// Reject end dates before today (UTC).
    pub min_today: bool,
}

impl Default for DateSettings {
    fn default() -> Self {
        Self { min_today: true }
    }
}

impl Settings {
    /// Checks the values that would make the widget misbehave.
    pub fn validate(&self) -> Result<(), String> {
        if self.countdown.update_interval_ms == 0 {
            return Err("countdown.update_interval_ms must be greater than zero".to_string());
        }

        if self.fit.min_size == 0 {
            return Err("fit.min_size must be at least 1".to_string());
        }

        if self.fit.min_size > self.fit.max_size {
            return Err(format!(
                "fit.min_size ({}) must not exceed fit.max_size ({})",
                self.fit.min_size, self.fit.max_size
            ));
        }

        if !self.fit.padding.is_finite() || self.fit.padding < 0.0 {
            return Err("fit.padding must be a non-negative number".to_string());
        }

        Ok(())
    }
}
