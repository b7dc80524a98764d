use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::common::OutputFormat;

/// User configuration, stored as TOML at `~/.cable-rating/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CableConfig {
    #[serde(default)]
    pub tables: TablesConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TablesConfig {
    /// Table file used when `--tables` is not given; empty means bundled tables
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

/// Parameter defaults applied beneath parameter files and flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_max_voltage_drop")]
    pub max_voltage_drop_percent: f64,
    #[serde(default = "default_fault_duration")]
    pub fault_duration_s: f64,
    #[serde(default = "default_cable_length")]
    pub cable_length_m: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            max_voltage_drop_percent: default_max_voltage_drop(),
            fault_duration_s: default_fault_duration(),
            cable_length_m: default_cable_length(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_format() -> String {
    "table".to_string()
}

fn default_max_voltage_drop() -> f64 {
    5.0
}

fn default_fault_duration() -> f64 {
    1.0
}

fn default_cable_length() -> f64 {
    100.0
}

fn default_log_level() -> String {
    "info".to_string()
}

impl CableConfig {
    /// Output format named in the config file.
    pub fn output_format(&self) -> Result<OutputFormat> {
        OutputFormat::from_config(&self.output.format)
            .context("invalid [output] format in configuration")
    }

    /// Log level named in the config file.
    pub fn log_level(&self) -> Result<tracing::Level> {
        self.logging
            .level
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid [logging] level '{}'", self.logging.level))
    }

    /// Table file to load, if one is configured.
    pub fn tables_path(&self) -> Option<PathBuf> {
        let path = self.tables.path.trim();
        (!path.is_empty()).then(|| expand_home(path))
    }
}

/// Default location of the config file.
pub fn default_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("unable to determine home directory")?;
    Ok(home.join(".cable-rating").join("config.toml"))
}

/// Resolve an explicit `--config` path or fall back to the default.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => default_config_path(),
    }
}

/// Load config from a path. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<CableConfig> {
    if !path.exists() {
        return Ok(CableConfig::default());
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading config from {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("parsing config from {}", path.display()))
}

/// Write config to a path, creating parent directories.
pub fn save_config(path: &Path, config: &CableConfig) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating config directory {}", parent.display()))?;
    }
    let contents = toml::to_string_pretty(config).context("serializing config")?;
    fs::write(path, contents).with_context(|| format!("writing config to {}", path.display()))
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, CableConfig::default());
        assert_eq!(config.output_format().unwrap(), OutputFormat::Table);
        assert_eq!(config.log_level().unwrap(), tracing::Level::INFO);
        assert!(config.tables_path().is_none());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[defaults]\nfault_duration_s = 0.5\n\n[output]\nformat = \"json\"\n")
            .unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.defaults.fault_duration_s, 0.5);
        assert_eq!(config.defaults.max_voltage_drop_percent, 5.0);
        assert_eq!(config.output_format().unwrap(), OutputFormat::Json);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = CableConfig::default();
        config.tables.path = "/data/tables.json".to_string();
        config.logging.level = "debug".to_string();
        save_config(&path, &config).unwrap();
        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.tables_path(), Some(PathBuf::from("/data/tables.json")));
        assert_eq!(loaded.log_level().unwrap(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_invalid_values_reported() {
        let mut config = CableConfig::default();
        config.output.format = "yaml".to_string();
        config.logging.level = "loud".to_string();
        assert!(config.output_format().is_err());
        assert!(config.log_level().is_err());
    }
}
