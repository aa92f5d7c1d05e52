//! Capturing the result region as a raster.

use std::future::Future;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::config::RenderSettings;
use crate::error::ExportError;
use crate::models::{CalculationResult, Score, Tier};

use super::raster::{RasterImage, Rgba, parse_hex_color};

/// Options passed to a renderer for one capture.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Output quality between 0 and 1, read by the encoder.
    pub quality: f32,
    /// Pixel density multiplier.
    pub pixel_ratio: u32,
    /// Background fill colour.
    pub background: [u8; 3],
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            quality: 1.0,
            pixel_ratio: 2,
            background: [0xff, 0xff, 0xff],
        }
    }
}

impl TryFrom<&RenderSettings> for RenderOptions {
    type Error = ExportError;

    fn try_from(settings: &RenderSettings) -> Result<Self, Self::Error> {
        let background =
            parse_hex_color(&settings.background_color).ok_or_else(|| ExportError::Capture {
                message: format!("invalid background colour '{}'", settings.background_color),
            })?;
        Ok(Self {
            quality: settings.quality.clamp(0.0, 1.0),
            pixel_ratio: settings.pixel_ratio.max(1),
            background,
        })
    }
}

/// Renders the visible result region to an image.
pub trait ResultRenderer {
    /// Captures `result` as it would appear on screen.
    fn capture(
        &self,
        result: &CalculationResult,
        options: &RenderOptions,
    ) -> impl Future<Output = Result<RasterImage, ExportError>> + Send;
}

const CARD_WIDTH: u32 = 320;
const CARD_HEIGHT: u32 = 160;
const BAND_HEIGHT: u32 = 24;
const GAUGE_X: u32 = 20;
const GAUGE_Y: u32 = 100;
const GAUGE_WIDTH: u32 = 280;
const GAUGE_HEIGHT: u32 = 16;
const BADGE_SIZE: u32 = 40;
const MAX_PIXEL_RATIO: u32 = 8;

const SENTINEL_ACCENT: [u8; 3] = [0x63, 0x66, 0xf1];
const TRACK: Rgba = [0xe5, 0xe7, 0xeb, 0xff];
const TICK: Rgba = [0x9c, 0xa3, 0xaf, 0xff];

/// Draws a glyph-free result card: a coloured band and badge in the tier's
/// accent colour, and a gauge showing where the score sits on the 0–150
/// scale with a tick at every tier boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct CardRenderer;

impl CardRenderer {
    /// Renders synchronously.
    pub fn render(
        &self,
        result: &CalculationResult,
        options: &RenderOptions,
    ) -> Result<RasterImage, ExportError> {
        let ratio = options.pixel_ratio;
        if ratio == 0 || ratio > MAX_PIXEL_RATIO {
            return Err(ExportError::Capture {
                message: format!("pixel ratio must be between 1 and {}, got {}", MAX_PIXEL_RATIO, ratio),
            });
        }

        let [r, g, b] = options.background;
        let mut card = RasterImage::new(CARD_WIDTH * ratio, CARD_HEIGHT * ratio, [r, g, b, 0xff]);

        let [ar, ag, ab] = match result.score {
            Score::Sentinel => SENTINEL_ACCENT,
            Score::Value { tier, .. } => tier.color(),
        };
        let accent = [ar, ag, ab, 0xff];

        card.fill_rect(0, 0, CARD_WIDTH * ratio, BAND_HEIGHT * ratio, accent);
        card.fill_rect(
            (CARD_WIDTH - GAUGE_X - BADGE_SIZE) * ratio,
            (BAND_HEIGHT + 16) * ratio,
            BADGE_SIZE * ratio,
            BADGE_SIZE * ratio,
            accent,
        );

        card.fill_rect(
            GAUGE_X * ratio,
            GAUGE_Y * ratio,
            GAUGE_WIDTH * ratio,
            GAUGE_HEIGHT * ratio,
            TRACK,
        );
        let filled = gauge_width(&result.score);
        card.fill_rect(
            GAUGE_X * ratio,
            GAUGE_Y * ratio,
            filled * ratio,
            GAUGE_HEIGHT * ratio,
            accent,
        );

        for lower in Tier::ALL.iter().filter_map(|t| t.lower_bound()) {
            let x = GAUGE_X + scale_to_gauge(lower);
            card.fill_rect(
                x * ratio,
                (GAUGE_Y - 4) * ratio,
                ratio,
                (GAUGE_HEIGHT + 8) * ratio,
                TICK,
            );
        }

        Ok(card)
    }
}

impl ResultRenderer for CardRenderer {
    async fn capture(
        &self,
        result: &CalculationResult,
        options: &RenderOptions,
    ) -> Result<RasterImage, ExportError> {
        self.render(result, options)
    }
}

/// Logical gauge fill width for a score; the sentinel fills the gauge.
fn gauge_width(score: &Score) -> u32 {
    match score {
        Score::Sentinel => GAUGE_WIDTH,
        Score::Value { value, .. } => scale_to_gauge(*value),
    }
}

fn scale_to_gauge(value: Decimal) -> u32 {
    let top = Decimal::from(150);
    let clamped = value.max(Decimal::ZERO).min(top);
    (clamped * Decimal::from(GAUGE_WIDTH) / top)
        .round()
        .to_u32()
        .unwrap_or(0)
        .min(GAUGE_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::calculate_score;
    use crate::models::{CalculationInput, FactorSelection};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn result_for(salary: &str, work: &str, slacking: &str) -> CalculationResult {
        calculate_score(CalculationInput {
            name: String::new(),
            daily_salary: dec(salary),
            work_hours: dec(work),
            commute_hours: Decimal::ZERO,
            slacking_hours: dec(slacking),
            factors: FactorSelection::default(),
        })
    }

    #[test]
    fn test_card_size_follows_pixel_ratio() {
        let result = result_for("300", "8", "0");
        let card = CardRenderer.render(&result, &RenderOptions::default()).unwrap();
        assert_eq!(card.width(), 640);
        assert_eq!(card.height(), 320);

        let options = RenderOptions {
            pixel_ratio: 1,
            ..RenderOptions::default()
        };
        let card = CardRenderer.render(&result, &options).unwrap();
        assert_eq!(card.width(), 320);
    }

    #[test]
    fn test_band_uses_tier_colour() {
        // 300 / 8 = 37.5, the [30, 50) tier
        let result = result_for("300", "8", "0");
        let card = CardRenderer.render(&result, &RenderOptions::default()).unwrap();
        let [r, g, b] = Tier::Endure.color();
        assert_eq!(card.pixel(0, 0), Some([r, g, b, 0xff]));
    }

    #[test]
    fn test_sentinel_fills_gauge() {
        let result = result_for("300", "4", "10");
        let options = RenderOptions {
            pixel_ratio: 1,
            ..RenderOptions::default()
        };
        let card = CardRenderer.render(&result, &options).unwrap();
        let [r, g, b] = SENTINEL_ACCENT;
        assert_eq!(
            card.pixel(GAUGE_X + GAUGE_WIDTH - 1, GAUGE_Y + 2),
            Some([r, g, b, 0xff])
        );
    }

    #[test]
    fn test_background_colour_is_applied() {
        let result = result_for("300", "8", "0");
        let options = RenderOptions {
            pixel_ratio: 1,
            background: [0x10, 0x20, 0x30],
            ..RenderOptions::default()
        };
        let card = CardRenderer.render(&result, &options).unwrap();
        assert_eq!(card.pixel(5, CARD_HEIGHT - 1), Some([0x10, 0x20, 0x30, 0xff]));
    }

    #[test]
    fn test_gauge_scale() {
        assert_eq!(scale_to_gauge(dec("0")), 0);
        assert_eq!(scale_to_gauge(dec("75")), 140);
        assert_eq!(scale_to_gauge(dec("150")), GAUGE_WIDTH);
        assert_eq!(scale_to_gauge(dec("9000")), GAUGE_WIDTH);
        assert_eq!(scale_to_gauge(dec("-3")), 0);
    }

    #[test]
    fn test_invalid_pixel_ratio_fails_capture() {
        let result = result_for("300", "8", "0");
        let options = RenderOptions {
            pixel_ratio: 0,
            ..RenderOptions::default()
        };
        assert!(matches!(
            CardRenderer.render(&result, &options),
            Err(ExportError::Capture { .. })
        ));
    }

    #[test]
    fn test_options_from_settings() {
        let options = RenderOptions::try_from(&RenderSettings::default()).unwrap();
        assert_eq!(options, RenderOptions::default());

        let settings = RenderSettings {
            background_color: "nope".to_string(),
            ..RenderSettings::default()
        };
        assert!(RenderOptions::try_from(&settings).is_err());
    }
}
