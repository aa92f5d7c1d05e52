//! Share-image export.
//!
//! The result card is captured by a [`ResultRenderer`], composited with an
//! optional QR overlay, encoded by an [`ImageEncoder`] and handed to a
//! [`ShareTarget`], falling back to a [`Downloader`]. The traits are the
//! seams for platform-specific collaborators; [`CardRenderer`],
//! [`PngEncoder`], [`UnavailableShare`] and [`FileDownloader`] are the
//! built-in ones the CLI uses.

mod composite;
mod deliver;
mod encode;
mod pipeline;
mod raster;
mod render;

pub use composite::{OVERLAY_PADDING, OVERLAY_SIZE, composite_share_image};
pub use deliver::{Downloader, FileDownloader, SharePayload, ShareTarget, UnavailableShare};
pub use encode::{EncodedImage, ImageEncoder, PNG_MIME_TYPE, PngEncoder, decode_png, load_overlay};
pub use pipeline::{DEFAULT_FILENAME, ExportOutcome, ExportPipeline, SHARE_FALLBACK_NOTICE};
pub use raster::{RasterImage, Rgba, WHITE, parse_hex_color};
pub use render::{CardRenderer, RenderOptions, ResultRenderer};
