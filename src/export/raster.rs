//! The RGBA raster the export pipeline draws into, over an `image` buffer.

use image::RgbaImage;
use image::imageops::{self, FilterType};

/// One RGBA pixel.
pub type Rgba = [u8; 4];

/// Opaque white.
pub const WHITE: Rgba = [0xff, 0xff, 0xff, 0xff];

/// Parses `#rrggbb` or `#rgb` into an RGB triple.
///
/// ```
/// use job_worth::export::parse_hex_color;
///
/// assert_eq!(parse_hex_color("#ffffff"), Some([255, 255, 255]));
/// assert_eq!(parse_hex_color("#0f0"), Some([0, 255, 0]));
/// assert_eq!(parse_hex_color("white"), None);
/// ```
pub fn parse_hex_color(text: &str) -> Option<[u8; 3]> {
    let hex = text.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    match hex.len() {
        6 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some([channel(0)?, channel(2)?, channel(4)?])
        }
        3 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some([channel(0)?, channel(1)?, channel(2)?])
        }
        _ => None,
    }
}

/// Row-major RGBA8 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    buffer: RgbaImage,
}

impl RasterImage {
    /// Creates an image filled with one colour.
    pub fn new(width: u32, height: u32, fill: Rgba) -> Self {
        Self {
            buffer: RgbaImage::from_pixel(width, height, image::Rgba(fill)),
        }
    }

    /// Wraps existing RGBA bytes, checking the length matches the size.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        RgbaImage::from_raw(width, height, pixels)
            .filter(|buffer| buffer.as_raw().len() == width as usize * height as usize * 4)
            .map(|buffer| Self { buffer })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Returns true if the image has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// The raw RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_raw()
    }

    /// The pixel at `(x, y)`, if inside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.buffer.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Overwrites the pixel at `(x, y)`; out-of-bounds writes are dropped.
    pub fn put_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if let Some(pixel) = self.buffer.get_pixel_mut_checked(x, y) {
            *pixel = image::Rgba(color);
        }
    }

    /// Fills a rectangle, clipped to the image.
    pub fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgba) {
        let x_end = x.saturating_add(width).min(self.width());
        let y_end = y.saturating_add(height).min(self.height());
        for py in y..y_end {
            for px in x..x_end {
                self.put_pixel(px, py, color);
            }
        }
    }

    /// Draws `src` with its top-left corner at `(x, y)`, blending by alpha.
    ///
    /// Negative offsets and overhangs are clipped.
    pub fn draw_image(&mut self, src: &RasterImage, x: i64, y: i64) {
        imageops::overlay(&mut self.buffer, &src.buffer, x, y);
    }

    /// A nearest-neighbour resize.
    pub fn resized(&self, width: u32, height: u32) -> RasterImage {
        if self.is_empty() {
            return RasterImage::new(width, height, [0, 0, 0, 0]);
        }
        RasterImage {
            buffer: imageops::resize(&self.buffer, width, height, FilterType::Nearest),
        }
    }

    pub(crate) fn from_buffer(buffer: RgbaImage) -> Self {
        Self { buffer }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = [255, 0, 0, 255];
    const BLACK: Rgba = [0, 0, 0, 255];

    #[test]
    fn test_new_fills_every_pixel() {
        let image = RasterImage::new(3, 2, RED);
        assert_eq!(image.as_bytes().len(), 24);
        assert_eq!(image.pixel(2, 1), Some(RED));
        assert_eq!(image.pixel(3, 0), None);
    }

    #[test]
    fn test_from_rgba_checks_length() {
        assert!(RasterImage::from_rgba(2, 2, vec![0; 16]).is_some());
        assert!(RasterImage::from_rgba(2, 2, vec![0; 15]).is_none());
    }

    #[test]
    fn test_fill_rect_is_clipped() {
        let mut image = RasterImage::new(4, 4, WHITE);
        image.fill_rect(2, 2, 10, 10, BLACK);
        assert_eq!(image.pixel(1, 1), Some(WHITE));
        assert_eq!(image.pixel(3, 3), Some(BLACK));
    }

    #[test]
    fn test_draw_image_clips_negative_offsets() {
        let mut canvas = RasterImage::new(4, 4, WHITE);
        let stamp = RasterImage::new(2, 2, RED);
        canvas.draw_image(&stamp, -1, -1);
        assert_eq!(canvas.pixel(0, 0), Some(RED));
        assert_eq!(canvas.pixel(1, 1), Some(WHITE));

        canvas.draw_image(&stamp, 3, 3);
        assert_eq!(canvas.pixel(3, 3), Some(RED));
    }

    #[test]
    fn test_transparent_pixels_leave_destination() {
        let mut canvas = RasterImage::new(1, 1, WHITE);
        canvas.draw_image(&RasterImage::new(1, 1, [0, 0, 0, 0]), 0, 0);
        assert_eq!(canvas.pixel(0, 0), Some(WHITE));
    }

    #[test]
    fn test_half_alpha_blends() {
        let mut canvas = RasterImage::new(1, 1, WHITE);
        canvas.draw_image(&RasterImage::new(1, 1, [0, 0, 0, 128]), 0, 0);

        let [r, g, b, a] = canvas.pixel(0, 0).unwrap();
        assert!((120..=135).contains(&r));
        assert_eq!((r, g), (g, b));
        assert_eq!(a, 255);
    }

    #[test]
    fn test_resize_nearest_neighbour() {
        let mut image = RasterImage::new(2, 1, RED);
        image.put_pixel(1, 0, BLACK);
        let wide = image.resized(4, 2);
        assert_eq!((wide.width(), wide.height()), (4, 2));
        assert_eq!(wide.pixel(0, 1), Some(RED));
        assert_eq!(wide.pixel(3, 1), Some(BLACK));
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#1a2B3c"), Some([0x1a, 0x2b, 0x3c]));
        assert_eq!(parse_hex_color("#fff"), Some([255, 255, 255]));
        assert_eq!(parse_hex_color("ffffff"), None);
        assert_eq!(parse_hex_color("#ffff"), None);
        assert_eq!(parse_hex_color("#gggggg"), None);
    }
}
