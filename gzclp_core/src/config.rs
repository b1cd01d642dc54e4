//! Configuration file support.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/gzclp/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub progression: ProgressionConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Progression parameters
///
/// `smallest_increment` depends on the plates the user has access to; 2.5kg
/// is often the smallest possible jump. The deload factors are applied after
/// a tier's rep-scheme cycle is exhausted without success.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProgressionConfig {
    #[serde(default = "default_smallest_increment")]
    pub smallest_increment: f64,

    #[serde(default = "default_deload_factor")]
    pub t1_deload_factor: f64,

    #[serde(default = "default_deload_factor")]
    pub t2_deload_factor: f64,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            smallest_increment: default_smallest_increment(),
            t1_deload_factor: default_deload_factor(),
            t2_deload_factor: default_deload_factor(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("gzclp")
}

fn default_smallest_increment() -> f64 {
    2.5
}

fn default_deload_factor() -> f64 {
    0.85
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("gzclp").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let p = &self.progression;
        if p.smallest_increment <= 0.0 {
            return Err(Error::Config(format!(
                "smallest_increment must be positive, got {}",
                p.smallest_increment
            )));
        }
        for (name, factor) in [
            ("t1_deload_factor", p.t1_deload_factor),
            ("t2_deload_factor", p.t2_deload_factor),
        ] {
            if !(0.0..=1.0).contains(&factor) {
                return Err(Error::Config(format!(
                    "{} must be within [0, 1], got {}",
                    name, factor
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.progression.smallest_increment, 2.5);
        assert_eq!(config.progression.t1_deload_factor, 0.85);
        assert_eq!(config.progression.t2_deload_factor, 0.85);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(
            config.progression.smallest_increment,
            parsed.progression.smallest_increment
        );
        assert_eq!(config.data.data_dir, parsed.data.data_dir);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[progression]
smallest_increment = 1.25
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.progression.smallest_increment, 1.25);
        assert_eq!(config.progression.t1_deload_factor, 0.85); // default
    }

    #[test]
    fn test_invalid_deload_factor_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[progression]\nt1_deload_factor = 1.5\n",
        )
        .unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}
