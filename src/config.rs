//! Optional report settings read from `report.toml` next to the log file.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ReportError;

/// File name looked up in the log file's directory.
pub const CONFIG_FILE_NAME: &str = "report.toml";

const MAX_DPI: u32 = 1200;

/// Largest accepted image width or height in pixels.
pub const MAX_IMAGE_SIDE: f64 = 20_000.0;

/// Output settings for the report.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Chart image path, relative to the working directory unless absolute.
    pub output_image: PathBuf,
    pub width_inches: f64,
    pub height_inches: f64,
    pub dpi: u32,
    /// Where to write the JSON summary; no summary when unset.
    pub summary_json: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_image: PathBuf::from("performance_analysis.png"),
            width_inches: 15.0,
            height_inches: 5.0,
            dpi: 300,
            summary_json: None,
        }
    }
}

impl ReportConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `config_path` - Path to the report.toml file
    ///
    /// # Returns
    /// * `Ok(ReportConfig)` if the file was loaded, parsed and validated
    /// * `Err(ReportError::Config)` with a descriptive message otherwise
    pub fn load(config_path: &Path) -> Result<Self, ReportError> {
        let content = std::fs::read_to_string(config_path).map_err(|e| ReportError::Config(format!("Failed to read config file: {}", e)))?;

        let config: ReportConfig = toml::from_str(&content).map_err(|e| ReportError::Config(format!("Failed to parse config file: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load the configuration belonging to a log file, falling back to defaults if there is none.
    pub fn for_log(log_path: &Path) -> Result<Self, ReportError> {
        let config_path = Self::config_path_from_log(log_path);
        if config_path.is_file() {
            log::info!("Using configuration from {}", config_path.display());
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Derive the config path from a log file path.
    ///
    /// Replaces the log filename with "report.toml" in the same directory.
    pub fn config_path_from_log(log_path: &Path) -> PathBuf {
        match log_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.join(CONFIG_FILE_NAME),
            _ => PathBuf::from(".").join(CONFIG_FILE_NAME),
        }
    }

    /// Image size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = self.dpi as f64;
        ((self.width_inches * dpi).round() as u32, (self.height_inches * dpi).round() as u32)
    }

    /// Check that the settings describe an image that can be drawn.
    pub fn validate(&self) -> Result<(), ReportError> {
        if !(self.width_inches > 0.0 && self.width_inches.is_finite()) {
            return Err(ReportError::Config(format!("width-inches must be positive, got {}", self.width_inches)));
        }
        if !(self.height_inches > 0.0 && self.height_inches.is_finite()) {
            return Err(ReportError::Config(format!("height-inches must be positive, got {}", self.height_inches)));
        }
        if self.dpi == 0 || self.dpi > MAX_DPI {
            return Err(ReportError::Config(format!("dpi must be between 1 and {}, got {}", MAX_DPI, self.dpi)));
        }
        let dpi = self.dpi as f64;
        if self.width_inches * dpi > MAX_IMAGE_SIDE || self.height_inches * dpi > MAX_IMAGE_SIDE {
            return Err(ReportError::Config(format!(
                "image of {:.0}x{:.0} pixels exceeds the {} pixel limit",
                self.width_inches * dpi,
                self.height_inches * dpi,
                MAX_IMAGE_SIDE
            )));
        }
        let (width, height) = self.pixel_size();
        if width < 300 || height < 100 {
            return Err(ReportError::Config(format!("image of {}x{} pixels is too small for three charts", width, height)));
        }
        if self.output_image.as_os_str().is_empty() {
            return Err(ReportError::Config("output-image must not be empty".to_string()));
        }
        Ok(())
    }
}
