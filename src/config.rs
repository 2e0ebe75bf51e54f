// Settings: built-in defaults, optionally overridden by a TOML file.
// Command-line overrides are applied on top in main.rs.

use std::path::Path;

use serde::Deserialize;

use crate::error::Error;
use crate::types::Theme;

/// Largest accepted block size; bigger blocks turn the whole scene into a few tiles.
pub const MAX_PIXEL_SIZE: u32 = 256;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { width: 1280, height: 720, title: "Ridgeline".to_string() }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Side of one pixel-art block.
    pub pixel_size: u32,
    /// Frame cap.
    pub fps: f64,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self { pixel_size: 8, fps: 24.0 }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub animation: AnimationSettings,
    pub theme: Theme,
    /// Fixed RNG seed; entropy when absent.
    pub seed: Option<u64>,
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        let cfg: Config = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| Error::ConfigRead { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.animation.pixel_size == 0 {
            return Err(Error::ConfigParse("animation.pixel_size must be at least 1".into()));
        }
        if self.animation.pixel_size > MAX_PIXEL_SIZE {
            return Err(Error::ConfigParse(format!(
                "animation.pixel_size must be at most {MAX_PIXEL_SIZE}, got {}",
                self.animation.pixel_size
            )));
        }
        if self.animation.fps.is_nan() || self.animation.fps <= 0.0 {
            return Err(Error::ConfigParse(format!("animation.fps must be positive, got {}", self.animation.fps)));
        }
        Ok(())
    }
}
