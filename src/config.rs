use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::formulas::DEFAULT_ROUNDING_INCREMENT;
use crate::logging::{LogConfig, LogFormat, LogLevel};
use crate::models::Units;

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Units used to label weights
    #[serde(default)]
    pub units: Units,

    /// Configuration metadata
    pub metadata: ConfigMetadata,

    /// Plan generation settings
    #[serde(default)]
    pub plan: PlanSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Configuration format version
    pub version: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Plan generation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSettings {
    /// Prescribed weights are rounded to a multiple of this (5 for pounds,
    /// 2.5 is common for kilos)
    pub rounding_increment: Decimal,
}

impl Default for PlanSettings {
    fn default() -> Self {
        PlanSettings {
            rounding_increment: DEFAULT_ROUNDING_INCREMENT,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let now = Utc::now();

        AppConfig {
            units: Units::default(),
            metadata: ConfigMetadata {
                version: "1.0".to_string(),
                created_at: now,
                updated_at: now,
            },
            plan: PlanSettings::default(),
            logging: LogConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: AppConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.metadata.updated_at = Utc::now();

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let toml_content =
            toml::to_string_pretty(self).with_context(|| "Failed to serialize configuration to TOML")?;

        fs::write(&path, toml_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".liftrs")
            .join("config.toml")
    }

    /// Load from `path` (or the default location), falling back to defaults
    /// when the file does not exist
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_config_path);

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        Self::load_from_file(&config_path)
    }

    pub fn validate(&self) -> Result<()> {
        if self.plan.rounding_increment <= Decimal::ZERO {
            anyhow::bail!(
                "plan.rounding_increment must be greater than 0, got {}",
                self.plan.rounding_increment
            );
        }
        Ok(())
    }

    /// Dotted keys understood by `get`/`set`
    pub fn keys() -> &'static [&'static str] {
        &[
            "plan.rounding_increment",
            "units",
            "logging.level",
            "logging.format",
            "logging.file_path",
        ]
    }

    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "plan.rounding_increment" => self.plan.rounding_increment.to_string(),
            "units" => match self.units {
                Units::Pounds => "pounds".to_string(),
                Units::Kilograms => "kilograms".to_string(),
            },
            "logging.level" => self.logging.level.as_str().to_string(),
            "logging.format" => self.logging.format.as_str().to_string(),
            "logging.file_path" => self
                .logging
                .file_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            _ => anyhow::bail!("Unknown configuration key: {}", key),
        };
        Ok(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "plan.rounding_increment" => {
                let increment: Decimal = value
                    .parse()
                    .with_context(|| format!("Invalid rounding increment: {}", value))?;
                if increment <= Decimal::ZERO {
                    anyhow::bail!("Rounding increment must be greater than 0");
                }
                self.plan.rounding_increment = increment;
            }
            "units" => {
                self.units = match value.to_lowercase().as_str() {
                    "lb" | "lbs" | "pounds" => Units::Pounds,
                    "kg" | "kgs" | "kilograms" => Units::Kilograms,
                    _ => anyhow::bail!("Unknown units: {}", value),
                };
            }
            "logging.level" => {
                self.logging.level = value.parse::<LogLevel>().map_err(anyhow::Error::msg)?;
            }
            "logging.format" => {
                self.logging.format = value.parse::<LogFormat>().map_err(anyhow::Error::msg)?;
            }
            "logging.file_path" => {
                self.logging.file_path = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            _ => anyhow::bail!("Unknown configuration key: {}", key),
        }

        self.metadata.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.metadata.version, deserialized.metadata.version);
        assert_eq!(deserialized.plan.rounding_increment, dec!(5));
        assert_eq!(deserialized.units, Units::Pounds);
    }

    #[test]
    fn test_get_and_set() {
        let mut config = AppConfig::default();

        config.set("plan.rounding_increment", "2.5").unwrap();
        config.set("units", "kg").unwrap();
        config.set("logging.level", "debug").unwrap();

        assert_eq!(config.get("plan.rounding_increment").unwrap(), "2.5");
        assert_eq!(config.get("units").unwrap(), "kilograms");
        assert_eq!(config.get("logging.level").unwrap(), "debug");

        assert!(config.set("plan.rounding_increment", "0").is_err());
        assert!(config.set("plan.rounding_increment", "five").is_err());
        assert!(config.get("plan.unknown").is_err());
    }

    #[test]
    fn test_config_file_io() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let mut original = AppConfig::default();
        original.set("plan.rounding_increment", "2.5").unwrap();
        original.save_to_file(&config_path).unwrap();

        let loaded = AppConfig::load_from_file(&config_path).unwrap();
        assert_eq!(loaded.plan.rounding_increment, dec!(2.5));
    }

    #[test]
    fn test_verbosity_override_is_not_persisted() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let mut config = AppConfig::default();
        let runtime_logging = config.logging.with_verbosity(2);
        assert_eq!(runtime_logging.level, LogLevel::Debug);

        config.set("units", "kg").unwrap();
        config.save_to_file(&config_path).unwrap();

        let loaded = AppConfig::load_from_file(&config_path).unwrap();
        assert_eq!(loaded.units, Units::Kilograms);
        assert_eq!(loaded.logging.level, LogLevel::Warn);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let temp_dir = tempdir().unwrap();
        let config = AppConfig::load_or_default(Some(&temp_dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.plan, PlanSettings::default());
    }

    #[test]
    fn test_invalid_increment_rejected_on_load() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let mut config = AppConfig::default();
        config.plan.rounding_increment = dec!(-5);
        config.save_to_file(&config_path).unwrap();

        assert!(AppConfig::load_from_file(&config_path).is_err());
    }
}
