//! Configuration loading and management
//!
//! Handles parsing of `.beatbook.toml` configuration files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Task list configuration
    #[serde(default)]
    pub tasks: TasksConfig,

    /// Library configuration
    #[serde(default)]
    pub library: LibraryConfig,
}

/// Storage-related configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Data directory override (defaults to the platform data dir)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

/// Task list configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksConfig {
    /// Slot key the task collection is persisted under
    #[serde(default = "default_tasks_slot")]
    pub slot: String,
}

fn default_tasks_slot() -> String {
    crate::task::DEFAULT_TASKS_SLOT.to_string()
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            slot: default_tasks_slot(),
        }
    }
}

/// Library configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Default lower BPM bound for `library list`
    #[serde(default = "default_min_bpm")]
    pub min_bpm: u16,

    /// Default upper BPM bound for `library list`
    #[serde(default = "default_max_bpm")]
    pub max_bpm: u16,
}

fn default_min_bpm() -> u16 {
    60
}

fn default_max_bpm() -> u16 {
    200
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            min_bpm: default_min_bpm(),
            max_bpm: default_max_bpm(),
        }
    }
}

impl Config {
    /// Load configuration from a `.beatbook.toml` file
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a directory, or return defaults
    pub fn load_from_dir(dir: &Path) -> Self {
        let config_path = dir.join(".beatbook.toml");
        if config_path.exists() {
            Self::load(&config_path).unwrap_or_default()
        } else {
            Self::default()
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> crate::error::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> crate::error::Result<()> {
        self.tasks.validate()?;
        self.library.validate()?;
        Ok(())
    }
}

impl TasksConfig {
    fn validate(&self) -> crate::error::Result<()> {
        let slot = self.slot.trim();
        if slot.is_empty() {
            return Err(crate::error::Error::InvalidConfig(
                "tasks.slot cannot be empty".to_string(),
            ));
        }
        if !slot
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
        {
            return Err(crate::error::Error::InvalidConfig(format!(
                "tasks.slot '{slot}' must be alphanumeric with - or _"
            )));
        }
        Ok(())
    }
}

impl LibraryConfig {
    fn validate(&self) -> crate::error::Result<()> {
        if self.min_bpm > self.max_bpm {
            return Err(crate::error::Error::InvalidConfig(format!(
                "library.min_bpm ({}) must be <= library.max_bpm ({})",
                self.min_bpm, self.max_bpm
            )));
        }
        Ok(())
    }
}
