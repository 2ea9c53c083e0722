//! Configuration file support for mapselect.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/mapselect/config.toml`. Settings cover the initial map view,
//! the drawing tool's appearance, and the result dialog's formatting and labels.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod types;

pub use types::{DrawConfig, MapConfig, PresenterConfig};

use crate::draw::Color;
use crate::geo::point::{LATITUDE_RANGE, LONGITUDE_RANGE};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [map]
/// center = [55.751244, 37.618423]
/// zoom = 10
///
/// [draw]
/// position = "top-left"
/// color = "#3388ff"
/// weight = 4.0
///
/// [presenter]
/// decimals = 6
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Initial map view and tile source
    #[serde(default)]
    pub map: MapConfig,

    /// Drawing tool appearance
    #[serde(default)]
    pub draw: DrawConfig,

    /// Result dialog formatting and labels
    #[serde(default)]
    pub presenter: PresenterConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value (or reset to the
    /// default when there is no nearest value) and a warning is logged.
    ///
    /// Validated ranges:
    /// - `map.center`: latitude -90 - 90, longitude -180 - 180
    /// - `map.zoom`: 0 - 19
    /// - `draw.weight`: 1.0 - 20.0
    /// - `draw.opacity`, `draw.fill_opacity`: 0.0 - 1.0
    /// - `presenter.decimals`: 0 - 12
    pub fn validate_and_clamp(&mut self) {
        let [lat, lng] = self.map.center;
        if !lat.is_finite() || !lng.is_finite() {
            warn!("Invalid map center [{lat}, {lng}], using default");
            self.map.center = types::default_center();
        } else {
            if !LATITUDE_RANGE.contains(&lat) {
                warn!("Invalid center latitude {lat:.6}, clamping to -90-90 range");
                self.map.center[0] = lat.clamp(-90.0, 90.0);
            }
            if !LONGITUDE_RANGE.contains(&lng) {
                warn!("Invalid center longitude {lng:.6}, clamping to -180-180 range");
                self.map.center[1] = lng.clamp(-180.0, 180.0);
            }
        }

        if self.map.zoom > 19 {
            warn!("Invalid zoom {}, clamping to 0-19 range", self.map.zoom);
            self.map.zoom = 19;
        }

        if !["{z}", "{x}", "{y}"]
            .iter()
            .all(|placeholder| self.map.tile_url.contains(placeholder))
        {
            warn!(
                "Tile URL '{}' lacks {{z}}/{{x}}/{{y}} placeholders, using default",
                self.map.tile_url
            );
            self.map.tile_url = types::default_tile_url();
        }

        if Color::from_hex(&self.draw.color).is_none() {
            warn!(
                "Invalid draw color '{}', falling back to '{}'",
                self.draw.color,
                types::default_color()
            );
            self.draw.color = types::default_color();
        }

        // Weight: 1.0 - 20.0
        if !(1.0..=20.0).contains(&self.draw.weight) {
            warn!(
                "Invalid weight {:.1}, clamping to 1.0-20.0 range",
                self.draw.weight
            );
            self.draw.weight = clamp_or(self.draw.weight, 1.0, 20.0, 4.0);
        }

        if !(0.0..=1.0).contains(&self.draw.opacity) {
            warn!(
                "Invalid opacity {:.2}, clamping to 0.0-1.0 range",
                self.draw.opacity
            );
            self.draw.opacity = clamp_or(self.draw.opacity, 0.0, 1.0, 0.5);
        }

        if !(0.0..=1.0).contains(&self.draw.fill_opacity) {
            warn!(
                "Invalid fill_opacity {:.2}, clamping to 0.0-1.0 range",
                self.draw.fill_opacity
            );
            self.draw.fill_opacity = clamp_or(self.draw.fill_opacity, 0.0, 1.0, 0.2);
        }

        if self.presenter.decimals > 12 {
            warn!(
                "Invalid decimals {}, clamping to 0-12 range",
                self.presenter.decimals
            );
            self.presenter.decimals = 12;
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/mapselect/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("mapselect");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default path, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit file.
    ///
    /// Unlike [`Config::load`], a missing file is an error here.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Saves the current configuration to the default path.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    /// Serializes the config to TOML and writes it to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, config_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Writes the documented example config to the default path.
    ///
    /// # Errors
    /// Returns an error if a config file already exists or cannot be written.
    pub fn create_default_file() -> Result<PathBuf> {
        let config_path = Self::get_config_path()?;
        Self::create_default_file_at(&config_path)?;
        Ok(config_path)
    }

    /// Writes the documented example config to `path`, refusing to overwrite.
    pub fn create_default_file_at(path: &Path) -> Result<()> {
        if path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                path.display()
            ));
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        fs::write(path, EXAMPLE_CONFIG)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        info!("Created default config at {}", path.display());
        Ok(())
    }

    /// JSON schema describing the config file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

/// The documented example configuration shipped with the crate.
pub const EXAMPLE_CONFIG: &str = include_str!("../../config.example.toml");

fn clamp_or(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}
