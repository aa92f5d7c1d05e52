//! Combines the captured result card with the QR overlay.

use tracing::warn;

use crate::error::ExportError;

use super::raster::{RasterImage, WHITE};

/// Edge length the overlay is scaled to.
pub const OVERLAY_SIZE: u32 = 100;

/// Gap between the overlay and the canvas edges.
pub const OVERLAY_PADDING: u32 = 20;

/// Builds the share canvas.
///
/// The canvas is as wide as the screenshot and `OVERLAY_SIZE + 2 *
/// OVERLAY_PADDING` taller. It is filled white, the screenshot is drawn at
/// the origin and the overlay (if any) is drawn at
/// `(width - OVERLAY_SIZE - OVERLAY_PADDING, screenshot_height - OVERLAY_PADDING)`.
pub fn composite_share_image(
    screenshot: &RasterImage,
    overlay: Option<&RasterImage>,
) -> Result<RasterImage, ExportError> {
    if screenshot.is_empty() {
        return Err(ExportError::Composite {
            message: "captured image is empty".to_string(),
        });
    }

    let height = screenshot
        .height()
        .checked_add(OVERLAY_SIZE + 2 * OVERLAY_PADDING)
        .ok_or_else(|| ExportError::Composite {
            message: format!("captured image too tall: {}", screenshot.height()),
        })?;

    let mut canvas = RasterImage::new(screenshot.width(), height, WHITE);
    canvas.draw_image(screenshot, 0, 0);

    match overlay {
        Some(overlay) if !overlay.is_empty() => {
            let scaled = overlay.resized(OVERLAY_SIZE, OVERLAY_SIZE);
            let x = i64::from(screenshot.width()) - i64::from(OVERLAY_SIZE + OVERLAY_PADDING);
            let y = i64::from(screenshot.height()) - i64::from(OVERLAY_PADDING);
            canvas.draw_image(&scaled, x, y);
        }
        Some(_) => warn!("Overlay image has no pixels, skipping draw"),
        None => {}
    }

    Ok(canvas)
}
