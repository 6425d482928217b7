/// Settings for pinetools
///
/// Loaded from a JSON file. Every field has a default, so a partial file
/// (or no file at all) is fine.

use crate::error::{PineError, Result};
use crate::filebrain::ViewMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Env var pointing at an explicit config file
pub const ENV_CONFIG_PATH: &str = "PINETOOLS_CONFIG";

const CONFIG_DIR_NAME: &str = "pinetools";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub workflow: WorkflowSettings,
    pub file_brain: FileBrainSettings,
    pub logging: LoggingSettings,
}

/// Timings of the simulated workflow run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorkflowSettings {
    /// Wait before a step flips to processing
    pub step_start_delay_ms: u64,
    /// Wait before a processing step flips to completed
    pub step_finish_delay_ms: u64,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            step_start_delay_ms: 800,
            step_finish_delay_ms: 1200,
        }
    }
}

impl WorkflowSettings {
    pub fn step_start_delay(&self) -> Duration {
        Duration::from_millis(self.step_start_delay_ms)
    }

    pub fn step_finish_delay(&self) -> Duration {
        Duration::from_millis(self.step_finish_delay_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FileBrainSettings {
    /// Per-file upload wait
    pub upload_delay_ms: u64,
    /// Wait after the last upload before files turn ready
    pub processing_delay_ms: u64,
    /// Wait when saving a link
    pub link_delay_ms: u64,
    /// Start with the demo files and activities
    pub seed_demo_data: bool,
    pub default_view_mode: ViewMode,
}

impl Default for FileBrainSettings {
    fn default() -> Self {
        Self {
            upload_delay_ms: 500,
            processing_delay_ms: 1000,
            link_delay_ms: 1500,
            seed_demo_data: true,
            default_view_mode: ViewMode::Grid,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter used when RUST_LOG is unset
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Settings {
    /// Settings with every delay set to zero. Handy for scripted runs.
    pub fn instant() -> Self {
        let mut settings = Self::default();
        settings.workflow.step_start_delay_ms = 0;
        settings.workflow.step_finish_delay_ms = 0;
        settings.file_brain.upload_delay_ms = 0;
        settings.file_brain.processing_delay_ms = 0;
        settings.file_brain.link_delay_ms = 0;
        settings
    }

    /// Where the config file is looked up.
    ///
    /// `$PINETOOLS_CONFIG` wins, then `<config_dir>/pinetools/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(explicit) = std::env::var(ENV_CONFIG_PATH) {
            let trimmed = explicit.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }

        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load from the default location, falling back to defaults
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from a specific file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&raw)
            .map_err(|e| PineError::Config(format!("{}: {}", path.display(), e)))?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(settings)
    }

    /// Write settings as pretty JSON, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_simulation_timings() {
        let settings = Settings::default();
        assert_eq!(settings.workflow.step_start_delay(), Duration::from_millis(800));
        assert_eq!(settings.workflow.step_finish_delay(), Duration::from_millis(1200));
        assert_eq!(settings.file_brain.upload_delay_ms, 500);
        assert_eq!(settings.file_brain.processing_delay_ms, 1000);
        assert_eq!(settings.file_brain.link_delay_ms, 1500);
        assert!(settings.file_brain.seed_demo_data);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load_from(&dir.path().join("nope.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "workflow": { "step_start_delay_ms": 10 } }"#).unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.workflow.step_start_delay_ms, 10);
        assert_eq!(settings.workflow.step_finish_delay_ms, 1200);
        assert_eq!(settings.logging.level, "warn");
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        match Settings::load_from(&path) {
            Err(PineError::Config(msg)) => assert!(msg.contains("config.json")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut settings = Settings::instant();
        settings.file_brain.default_view_mode = ViewMode::List;
        settings.save_to(&path).unwrap();

        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }
}
