use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use viewcfg_engine::formatter::DEFAULT_DATE_FORMAT;

/// Overrides `configuration_folder` when set
pub const CONFIG_FOLDER_ENV: &str = "VIEWCFG_CONFIG_FOLDER";

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

/// Host options for the visualizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerOptions {
    /// Folder holding one JSON document per configured type
    pub configuration_folder: PathBuf,
    /// Lifetime of formatted values in the value cache, in seconds
    pub cache_timeout: u64,
    pub max_cache_items: usize,
    /// Persist generated defaults and imports immediately
    pub auto_save: bool,
    pub default_date_format: String,
}

impl Default for VisualizerOptions {
    fn default() -> Self {
        Self {
            configuration_folder: PathBuf::from("Configs"),
            cache_timeout: 300,
            max_cache_items: 1000,
            auto_save: true,
            default_date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl VisualizerOptions {
    /// Options from the default location with environment overrides applied
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        Ok(Self::load_from(&path)?.with_env_overrides())
    }

    /// Missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let options: VisualizerOptions = toml::from_str(&content)?;
        Ok(options)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("viewcfg").join("options.toml"))
            .ok_or_else(|| Error::Config("Could not determine the user configuration directory".to_string()))
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(folder) = std::env::var(CONFIG_FOLDER_ENV)
            && !folder.is_empty()
        {
            self.configuration_folder = expand_tilde(&folder);
        }
        self
    }

    pub fn with_configuration_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.configuration_folder = folder.into();
        self
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let options = VisualizerOptions::default();
        assert_eq!(options.configuration_folder, PathBuf::from("Configs"));
        assert_eq!(options.cache_ttl(), Duration::from_secs(300));
        assert_eq!(options.max_cache_items, 1000);
        assert!(options.auto_save);
        assert_eq!(options.default_date_format, "yyyy-MM-dd HH:mm:ss");
    }

    #[test]
    fn test_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("nested").join("options.toml");

        let options = VisualizerOptions {
            auto_save: false,
            default_date_format: "dd.MM.yyyy".to_string(),
            ..VisualizerOptions::default()
        };
        options.save_to(&path)?;

        assert_eq!(VisualizerOptions::load_from(&path)?, options);
        Ok(())
    }

    #[test]
    fn test_partial_file_uses_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("options.toml");
        std::fs::write(&path, "max_cache_items = 10\n")?;

        let options = VisualizerOptions::load_from(&path)?;
        assert_eq!(options.max_cache_items, 10);
        assert_eq!(options.cache_timeout, 300);
        Ok(())
    }

    #[test]
    fn test_load_nonexistent_returns_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let options = VisualizerOptions::load_from(&temp_dir.path().join("missing.toml"))?;
        assert_eq!(options, VisualizerOptions::default());
        Ok(())
    }

    #[test]
    fn test_invalid_toml_is_config_error() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("options.toml");
        std::fs::write(&path, "auto_save = \"maybe\"")?;
        assert!(matches!(VisualizerOptions::load_from(&path), Err(Error::Config(_))));
        Ok(())
    }
}
