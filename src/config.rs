use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ConfigError, Result},
    imaging::{OutputFormat, ResizeFilter, RotationSampling},
};

/// Main configuration for the collage tool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seed for thumbnail placement; a fresh entropy seed is used when absent
    pub seed: Option<u64>,

    /// Treat undecodable inputs like missing ones instead of aborting
    pub skip_unreadable: bool,

    /// Canvas settings
    pub canvas: CanvasConfig,

    /// Thumbnail resampling settings
    pub thumbnail: ThumbnailConfig,

    /// Output encoding settings
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string()
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.output.validate()?;
        Ok(())
    }
}

/// Canvas configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// RGB color the canvas is filled with before any thumbnail is drawn
    pub background: [u8; 3],
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            background: [255, 255, 255],
        }
    }
}

/// Thumbnail configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailConfig {
    /// Filter used to scale source images
    pub filter: ResizeFilter,

    /// Sampling used when rotating thumbnails
    pub interpolation: RotationSampling,

    /// Fit inside the random box instead of stretching to it
    pub keep_aspect_ratio: bool,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Encoding of the written collage
    pub format: OutputFormat,

    /// JPEG only: quality from 1 to 100
    pub jpeg_quality: u8,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Png,
            jpeg_quality: 90,
        }
    }
}

impl OutputConfig {
    fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ConfigError::InvalidValue {
                key: "output.jpeg_quality".to_string(),
                value: self.jpeg_quality.to_string()
            }.into());
        }

        Ok(())
    }
}

/// Parse a `RRGGBB` color, with or without a leading `#`
pub fn parse_hex_color(value: &str) -> Result<[u8; 3]> {
    let invalid = || ConfigError::InvalidValue {
        key: "canvas.background".to_string(),
        value: value.to_string(),
    };

    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid().into());
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
    };

    Ok([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.canvas.background, [255, 255, 255]);
        assert_eq!(config.output.format, OutputFormat::Png);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("collage.toml");

        let mut original_config = Config::default();
        original_config.seed = Some(7);
        original_config.thumbnail.filter = ResizeFilter::Lanczos3;

        original_config.save_to_file(&file_path).unwrap();
        let loaded_config = Config::from_file(&file_path).unwrap();

        assert_eq!(original_config, loaded_config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("collage.toml");
        std::fs::write(
            &file_path,
            "skip_unreadable = true\n\n[canvas]\nbackground = [0, 0, 0]\n\n[output]\nformat = \"jpeg\"\n",
        )
        .unwrap();

        let config = Config::from_file(&file_path).unwrap();
        assert!(config.skip_unreadable);
        assert_eq!(config.canvas.background, [0, 0, 0]);
        assert_eq!(config.output.format, OutputFormat::Jpeg);
        assert_eq!(config.thumbnail, ThumbnailConfig::default());
    }

    #[test]
    fn test_thumbnail_interpolation_key() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("collage.toml");
        std::fs::write(&file_path, "[thumbnail]\ninterpolation = \"bicubic\"\n").unwrap();

        let config = Config::from_file(&file_path).unwrap();
        assert_eq!(config.thumbnail.interpolation, RotationSampling::Bicubic);
        assert_eq!(config.thumbnail.filter, ResizeFilter::Triangle);
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file("no/such/collage.toml").unwrap_err();
        assert!(err.user_message().contains("not found"));
    }

    #[test]
    fn test_unparseable_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("collage.toml");
        std::fs::write(&file_path, "[canvas]\nbackground = \"white\"\n").unwrap();

        assert!(Config::from_file(&file_path).is_err());
    }

    #[test]
    fn test_invalid_jpeg_quality() {
        let mut config = Config::default();
        config.output.jpeg_quality = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ff8000").unwrap(), [255, 128, 0]);
        assert_eq!(parse_hex_color("00FF00").unwrap(), [0, 255, 0]);
        assert!(parse_hex_color("fff").is_err());
        assert!(parse_hex_color("gg0000").is_err());
    }
}
