//! Configuration types.
//!
//! These structures are deserialized from the YAML configuration file. Every
//! field has a default, so an empty file (or no file at all) is valid.

use std::path::PathBuf;

use serde::Deserialize;

/// Options handed to the renderer when the result region is captured.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Output quality between 0 and 1.
    pub quality: f32,
    /// Pixel density multiplier.
    pub pixel_ratio: u32,
    /// Background fill colour as `#rrggbb`.
    pub background_color: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            quality: 1.0,
            pixel_ratio: 2,
            background_color: "#ffffff".to_string(),
        }
    }
}

/// Where and how the share image is produced.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Directory the download fallback writes into.
    pub output_dir: PathBuf,
    /// File name of the exported image.
    pub filename: String,
    /// Optional PNG drawn in the bottom-right corner of the share image.
    pub overlay_path: Option<PathBuf>,
    /// Render options.
    pub render: RenderSettings,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            filename: "job-value-result.png".to_string(),
            overlay_path: None,
            render: RenderSettings::default(),
        }
    }
}

/// Text attached when the image is shared.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShareSettings {
    /// Share sheet title.
    pub title: String,
    /// Share message; `{score}` is replaced with the score to two decimals.
    pub text_template: String,
}

impl Default for ShareSettings {
    fn default() -> Self {
        Self {
            title: "我的上班性价比测算结果！".to_string(),
            text_template: "快来看看我的上班性价比指数：{score}！你也来测测？".to_string(),
        }
    }
}

impl ShareSettings {
    /// Renders the share message for a score.
    pub fn text_for(&self, score: &str) -> String {
        self.text_template.replace("{score}", score)
    }
}

/// The coffee prompt printed under a result.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DonationSettings {
    /// Prompt line; empty hides the whole block.
    pub prompt: String,
    /// Path or URL of the donation QR code image.
    pub qr: Option<String>,
}

impl Default for DonationSettings {
    fn default() -> Self {
        Self {
            prompt: "如果你觉得这个有趣 请赏一杯咖啡☕️ 谢谢老板！".to_string(),
            qr: None,
        }
    }
}

impl DonationSettings {
    /// Lines to print under a result, in order.
    pub fn lines(&self) -> Vec<String> {
        let prompt = self.prompt.trim();
        if prompt.is_empty() {
            return Vec::new();
        }

        let mut lines = vec![prompt.to_string()];
        if let Some(qr) = self.qr.as_deref().map(str::trim).filter(|qr| !qr.is_empty()) {
            lines.push(format!("请我喝杯咖啡 ☕ {}", qr));
        }
        lines
    }
}

/// The complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Export settings.
    pub export: ExportSettings,
    /// Share settings.
    pub share: ShareSettings,
    /// Donation prompt settings.
    pub donation: DonationSettings,
}
