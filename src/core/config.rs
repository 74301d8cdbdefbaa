use crate::core::loss::DEFAULT_HORIZONS;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct DatasetConfig {
    /// Local `countries.json`. Takes precedence over `url`.
    pub path: Option<String>,
    pub url: Option<String>,
}

fn default_horizons() -> Vec<f64> {
    DEFAULT_HORIZONS.to_vec()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub dataset: DatasetConfig,
    pub default_country: Option<String>,
    pub default_amount: Option<f64>,
    #[serde(default = "default_horizons")]
    pub horizons: Vec<f64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            dataset: DatasetConfig::default(),
            default_country: None,
            default_amount: None,
            horizons: default_horizons(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "cashdrag", "cashdrag")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    /// Dataset file used when neither `dataset.path` nor `dataset.url` is set.
    pub fn default_dataset_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "cashdrag", "cashdrag")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().join("countries.json"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
dataset:
  url: "https://example.com/countries.json"
default_country: "DE"
default_amount: 25000
horizons: [1, 3, 5, 10, 20]
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(
            config.dataset.url.as_deref(),
            Some("https://example.com/countries.json")
        );
        assert!(config.dataset.path.is_none());
        assert_eq!(config.default_country.as_deref(), Some("DE"));
        assert_eq!(config.default_amount, Some(25000.0));
        assert_eq!(config.horizons, vec![1.0, 3.0, 5.0, 10.0, 20.0]);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").expect("Failed to deserialize");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.horizons, vec![1.0, 5.0, 10.0]);
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let err = AppConfig::load_from_path("/nonexistent/config.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
