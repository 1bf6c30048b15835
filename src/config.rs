//! Settings file at ~/.config/placemark/config.json.
//!
//! Every field is optional; missing fields fall back to defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::geo::EARTH_RADIUS_M;
use crate::place::{LocationSet, DEFAULT_THRESHOLD_M};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{field} must be a positive number, got {value}")]
    Invalid { field: &'static str, value: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_threshold")]
    pub threshold_m: f64,
    #[serde(default = "default_radius")]
    pub earth_radius_m: f64,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD_M
}

fn default_radius() -> f64 {
    EARTH_RADIUS_M
}

fn default_host() -> String {
    "127.0.0.1".into()
}

fn default_port() -> u16 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold_m: default_threshold(),
            earth_radius_m: default_radius(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load from an explicit path, or from the default location when `None`.
    /// A missing default file yields defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load_from(p),
            None => {
                let p = Self::default_path();
                if p.exists() {
                    Self::load_from(&p)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&data).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("placemark")
            .join("config.json")
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("threshold_m", self.threshold_m),
            ("earth_radius_m", self.earth_radius_m),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid { field, value });
            }
        }
        Ok(())
    }

    /// An empty set using this config's threshold and radius.
    pub fn location_set(&self) -> LocationSet {
        LocationSet::with_threshold(self.threshold_m).with_radius(self.earth_radius_m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "threshold_m": 500.0 }"#).unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.threshold_m, 500.0);
        assert_eq!(config.earth_radius_m, EARTH_RADIUS_M);
        assert_eq!(config.port, 3000);
        assert_eq!(config.location_set().threshold(), 500.0);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(Some(&dir.path().join("missing.json")));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "threshold_m = 5").unwrap();
        assert!(matches!(Config::load_from(&path), Err(ConfigError::Json { .. })));
    }

    #[test]
    fn test_rejects_non_positive_threshold() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "threshold_m": -1 }"#).unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Invalid { field: "threshold_m", .. })
        ));
    }

    #[test]
    fn test_default_is_valid() {
        assert!(Config::default().validate().is_ok());
    }
}
