//! Configuration loading and management.
//!
//! This module loads export and share settings from a YAML file. Every
//! setting has a default, so the calculator runs without any file at all.
//!
//! # Example
//!
//! ```no_run
//! use job_worth::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/job-worth.yaml").unwrap();
//! println!("Share title: {}", config.config().share.title);
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, DEFAULT_CONFIG_PATH};
pub use types::{AppConfig, DonationSettings, ExportSettings, RenderSettings, ShareSettings};
