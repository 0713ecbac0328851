// ABOUTME: Configuration file loading, validation, and hierarchical merging for termimg
// ABOUTME: Supports TOML config files with XDG Base Directory specification compliance

use crate::cli::SixelMode;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use termimg_core::constants::limits::MAX_PALETTE_SIZE;

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub show_images: Option<bool>,
    #[serde(default)]
    pub max_width: Option<u32>,
    #[serde(default, deserialize_with = "validate_max_colors")]
    pub max_colors: Option<usize>,
    #[serde(default)]
    pub attachments_dir: Option<PathBuf>,
    #[serde(default)]
    pub sixel: Option<SixelMode>,
}

impl Config {
    /// Load configuration from standard XDG-compliant locations
    pub fn load() -> Result<Self> {
        let paths = Self::get_config_paths();
        Self::load_from_paths(&paths)
    }

    /// Load configuration from file paths in order; later paths override earlier ones.
    /// Missing files are skipped, malformed ones are reported.
    pub fn load_from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut config = Config::default();

        for path in paths {
            let path = path.as_ref();
            if !path.is_file() {
                continue;
            }
            log::debug!("Loading config from {}", path.display());
            config = config.merge(Self::load_from_file(path)?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a single file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content).with_context(|| {
            format!(
                "Failed to parse TOML config file: {}",
                path.as_ref().display()
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Standard config file paths, lowest precedence first
    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. User config directory fallback
        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".config").join("termimg").join("config.toml"));
        }

        // 2. XDG config home
        if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(config_home).join("termimg").join("config.toml"));
        }

        // 3. Project-specific config (highest precedence)
        if let Ok(current_dir) = std::env::current_dir() {
            paths.push(current_dir.join("termimg.toml"));
        }

        paths
    }

    /// Merge this config with another, giving precedence to the other config
    pub fn merge(self, other: Config) -> Config {
        Config {
            show_images: other.show_images.or(self.show_images),
            max_width: other.max_width.or(self.max_width),
            max_colors: other.max_colors.or(self.max_colors),
            attachments_dir: other.attachments_dir.or(self.attachments_dir),
            sixel: other.sixel.or(self.sixel),
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_width == Some(0) {
            return Err(anyhow!("max_width must be greater than 0"));
        }
        Ok(())
    }
}

// Custom deserializer for palette size validation
fn validate_max_colors<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value: Option<usize> = Option::deserialize(deserializer)?;

    match value {
        Some(colors) if colors == 0 || colors > MAX_PALETTE_SIZE => Err(D::Error::custom(format!(
            "Invalid max_colors {}. Must be between 1 and {}",
            colors, MAX_PALETTE_SIZE
        ))),
        _ => Ok(value),
    }
}
