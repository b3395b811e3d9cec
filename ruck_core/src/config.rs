//! Configuration file support.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/ruck/config.toml`.
//! The `[defaults]` section lets the user change the baseline workout
//! the CLI starts from; anything unset falls back to the built-in
//! baseline.

use crate::types::{Sex, Terrain, UnitSystem, WorkoutInput};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub defaults: DefaultsConfig,
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

/// Overrides for the baseline workout input
///
/// Every field is optional; set ones replace the built-in baseline
/// value.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct DefaultsConfig {
    pub unit_system: Option<UnitSystem>,
    pub sex: Option<Sex>,
    pub age: Option<u32>,
    pub body_weight: Option<f64>,
    pub ruck_weight: Option<f64>,
    pub distance: Option<f64>,
    pub duration_hours: Option<f64>,
    pub duration_minutes: Option<f64>,
    pub terrain: Option<Terrain>,
    pub incline: Option<f64>,
}

impl DefaultsConfig {
    /// The configured baseline, with unset fields from the built-in one
    pub fn baseline(&self) -> WorkoutInput {
        let base = WorkoutInput::default();
        WorkoutInput {
            unit_system: self.unit_system.unwrap_or(base.unit_system),
            sex: self.sex.unwrap_or(base.sex),
            age: self.age.unwrap_or(base.age),
            body_weight: self.body_weight.unwrap_or(base.body_weight),
            ruck_weight: self.ruck_weight.unwrap_or(base.ruck_weight),
            distance: self.distance.unwrap_or(base.distance),
            duration_hours: self.duration_hours.unwrap_or(base.duration_hours),
            duration_minutes: self.duration_minutes.unwrap_or(base.duration_minutes),
            terrain: self.terrain.unwrap_or(base.terrain),
            incline: self.incline.unwrap_or(base.incline),
        }
    }
}

fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("ruck")
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("ruck").join("config.toml")
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
}
