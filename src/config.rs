//! Application configuration, read from a RON file.

use crate::errors::ConfigResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Where the configuration lives unless another path is given.
pub const DEFAULT_CONFIG_PATH: &str = "confrontation.ron";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Configuration {
    /// JSON file holding the player's progression.
    pub save_file_path: PathBuf,
    /// Makes battles, deciders and freshly built companions reproducible.
    pub seed: Option<u64>,
    /// Tracing filter used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            save_file_path: PathBuf::from("save.json"),
            seed: None,
            log_filter: "warn".to_string(),
        }
    }
}

impl Configuration {
    /// Read the configuration at `path`, falling back to the defaults when the file
    /// does not exist.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "no configuration file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let configuration = Self::parse(&content)?;
        info!(path = %path.display(), "configuration loaded");
        Ok(configuration)
    }

    pub fn parse(content: &str) -> ConfigResult<Self> {
        Ok(ron::from_str(content)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let content = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_fields_use_defaults() {
        let configuration = Configuration::parse("(seed: Some(42))").expect("valid configuration");
        assert_eq!(
            configuration,
            Configuration {
                seed: Some(42),
                ..Configuration::default()
            }
        );
    }

    #[test]
    fn test_malformed_configuration_is_an_error() {
        assert!(Configuration::parse("(seed: \"many\")").is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("confrontation-missing-config.ron");
        let _ = fs::remove_file(&path);
        assert_eq!(Configuration::load(&path).expect("defaults"), Configuration::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join("confrontation-saved-config.ron");
        let configuration = Configuration {
            save_file_path: PathBuf::from("elsewhere.json"),
            seed: Some(7),
            log_filter: "debug".to_string(),
        };

        configuration.save(&path).expect("saved");
        let loaded = Configuration::load(&path).expect("loaded");
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, configuration);
    }
}
