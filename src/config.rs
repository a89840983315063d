//! Application configuration
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const MIN_REFRESH_SECS: u64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where tasks, view state and logs live (defaults to the platform data dir)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// How often countdowns and due/overdue counters are re-derived
    pub refresh_interval_secs: u64,
    /// Ask before deleting a task
    pub confirm_delete: bool,
    /// Whether the completed list is visible on first start
    pub show_completed: bool,
    /// tracing filter used when RUST_LOG is not set
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            refresh_interval_secs: 60,
            confirm_delete: true,
            show_completed: false,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(crate::fs::default_data_dir)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(MIN_REFRESH_SECS))
    }
}

/// Config file path
/// Linux: ~/.config/eisen/config.toml
/// macOS: ~/Library/Application Support/eisen/config.toml
/// Windows: %APPDATA%\eisen\config.toml
pub fn get_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("failed to locate the user config directory")?;
    Ok(config_dir.join("eisen").join("config.toml"))
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed reading {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("invalid config file {}", path.display()))?;

    Ok(config)
}

pub fn save_config_to(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;

    Ok(())
}

/// Load the config, writing defaults on first run.
/// Returns (config, is_first_run)
pub fn check_first_run() -> Result<(Config, bool)> {
    let config_path = get_config_path()?;

    if !config_path.exists() {
        let config = Config::default();
        save_config_to(&config_path, &config)?;
        Ok((config, true))
    } else {
        Ok((load_config_from(&config_path)?, false))
    }
}

/// Print the effective configuration
pub fn show_config(config: &Config) -> Result<()> {
    println!("Current configuration:");
    println!("  data_dir:              {}", config.data_dir().display());
    println!("  refresh_interval_secs: {}", config.refresh_interval_secs);
    println!("  confirm_delete:        {}", config.confirm_delete);
    println!("  show_completed:        {}", config.show_completed);
    println!("  log_level:             {}", config.log_level);
    println!();
    println!("Config file: {}", get_config_path()?.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("eisen").join("config.toml");
        let config = Config {
            data_dir: Some(dir.path().join("data")),
            refresh_interval_secs: 5,
            confirm_delete: false,
            show_completed: true,
            log_level: "debug".to_string(),
        };

        save_config_to(&path, &config).unwrap();
        assert_eq!(load_config_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "confirm_delete = false\n").unwrap();

        let config = load_config_from(&path).unwrap();
        assert!(!config.confirm_delete);
        assert_eq!(config.refresh_interval_secs, 60);
        assert_eq!(config.data_dir, None);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "refresh_interval_secs = \"soon\"").unwrap();
        assert!(load_config_from(&path).is_err());
    }

    #[test]
    fn test_refresh_interval_has_a_floor() {
        let config = Config {
            refresh_interval_secs: 0,
            ..Config::default()
        };
        assert_eq!(config.refresh_interval(), Duration::from_secs(1));
    }
}
