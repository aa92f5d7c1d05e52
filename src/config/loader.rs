//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the calculator
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{WorthError, WorthResult};
use crate::export::parse_hex_color;

use super::types::AppConfig;

/// The file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "config/job-worth.yaml";

/// Loads and provides access to the application configuration.
///
/// # Example
///
/// ```no_run
/// use job_worth::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/job-worth.yaml")?;
/// println!("Images are saved to {}", loader.config().export.output_dir.display());
/// # Ok::<(), job_worth::error::WorthError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// Returns an error if the file is missing, is not valid YAML, or holds
    /// render settings outside their allowed range.
    pub fn load<P: AsRef<Path>>(path: P) -> WorthResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| WorthError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config: AppConfig =
            serde_yaml::from_str(&content).map_err(|e| WorthError::ConfigParseError {
                path: path_str.clone(),
                message: e.to_string(),
            })?;

        Self::check(&config).map_err(|message| WorthError::ConfigParseError {
            path: path_str.clone(),
            message,
        })?;

        debug!(path = %path_str, "Loaded configuration");
        Ok(Self { config })
    }

    /// Loads an explicit path, or the default path if it exists, or falls
    /// back to built-in defaults.
    ///
    /// An explicitly requested file that is missing is an error; a missing
    /// default file is not.
    pub fn load_or_default(path: Option<&Path>) -> WorthResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::load(DEFAULT_CONFIG_PATH),
            None => Ok(Self::default()),
        }
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn check(config: &AppConfig) -> Result<(), String> {
        let render = &config.export.render;
        if !(0.0..=1.0).contains(&render.quality) {
            return Err(format!(
                "export.render.quality must be between 0 and 1, got {}",
                render.quality
            ));
        }
        if render.pixel_ratio == 0 {
            return Err("export.render.pixel_ratio must be at least 1".to_string());
        }
        if parse_hex_color(&render.background_color).is_none() {
            return Err(format!(
                "export.render.background_color must look like #rrggbb, got '{}'",
                render.background_color
            ));
        }
        if config.export.filename.trim().is_empty() {
            return Err("export.filename must not be empty".to_string());
        }
        Ok(())
    }
}
