//! Configuration management for revq.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::Error;

/// Global revq configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub trend: TrendConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database. Defaults to ~/.revq/reviews.db.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// A review is critical when urgency is high and rating is at or
    /// below this value.
    #[serde(default = "default_critical_rating_threshold")]
    pub critical_rating_threshold: i64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            critical_rating_threshold: default_critical_rating_threshold(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendConfig {
    #[serde(default = "default_trend_days")]
    pub default_days: i64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            default_days: default_trend_days(),
        }
    }
}

fn default_critical_rating_threshold() -> i64 {
    2
}

fn default_trend_days() -> i64 {
    30
}

impl Config {
    /// Load config from ~/.revq/config.toml, falling back to defaults
    /// when the file does not exist.
    pub fn load() -> Result<Self, Error> {
        let path = Self::path();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to ~/.revq/config.toml.
    pub fn save(&self) -> Result<(), Error> {
        let path = Self::path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| Error::Other(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Path to global revq directory (~/.revq/).
    pub fn global_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".revq")
    }

    /// Path to config file.
    pub fn path() -> PathBuf {
        Self::global_dir().join("config.toml")
    }

    /// Resolved database path: configured value or the global default.
    pub fn db_path(&self) -> PathBuf {
        self.database
            .path
            .clone()
            .unwrap_or_else(|| Self::global_dir().join("reviews.db"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.report.critical_rating_threshold, 2);
        assert_eq!(config.trend.default_days, 30);
        assert!(config.database.path.is_none());
        assert!(config.db_path().ends_with("reviews.db"));
    }

    #[test]
    fn test_parse_partial_config() {
        let config: Config = toml::from_str(
            r#"
            [database]
            path = "/tmp/custom.db"
            "#,
        )
        .unwrap();
        assert_eq!(config.db_path(), PathBuf::from("/tmp/custom.db"));
        assert_eq!(config.report.critical_rating_threshold, 2);
    }

    #[test]
    fn test_round_trip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(
            parsed.report.critical_rating_threshold,
            config.report.critical_rating_threshold
        );
    }
}
