//! The share-image export pipeline.
//!
//! capture → composite → encode → deliver, strictly in sequence. At most one
//! export runs at a time; a second request while one is in flight fails with
//! [`ExportError::Busy`]. The score being exported is only ever read.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{info, warn};

use crate::config::{AppConfig, ShareSettings};
use crate::error::ExportError;
use crate::form::CalculatorForm;
use crate::models::CalculationResult;

use super::composite::composite_share_image;
use super::deliver::{Downloader, SharePayload, ShareTarget};
use super::encode::ImageEncoder;
use super::raster::RasterImage;
use super::render::{RenderOptions, ResultRenderer};

/// Told to the user when sharing failed and the image was saved instead.
pub const SHARE_FALLBACK_NOTICE: &str = "分享功能出错或浏览器不支持，已尝试为您下载图片。";

/// Default file name of the exported image.
pub const DEFAULT_FILENAME: &str = "job-value-result.png";

/// How an export finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The platform share facility accepted the image.
    Shared,
    /// The image was saved locally.
    Downloaded {
        /// Where the image was written.
        path: PathBuf,
        /// Set when this was a fallback after a failed share.
        notice: Option<&'static str>,
    },
}

/// Holds the busy flag for the lifetime of one export.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Runs exports against a set of collaborators.
#[derive(Debug)]
pub struct ExportPipeline<R, E, S, D> {
    renderer: R,
    encoder: E,
    share_target: S,
    downloader: D,
    overlay: Option<RasterImage>,
    options: RenderOptions,
    share: ShareSettings,
    filename: String,
    busy: AtomicBool,
}

impl<R, E, S, D> ExportPipeline<R, E, S, D>
where
    R: ResultRenderer,
    E: ImageEncoder,
    S: ShareTarget,
    D: Downloader,
{
    /// Creates a pipeline with default options and no overlay.
    pub fn new(renderer: R, encoder: E, share_target: S, downloader: D) -> Self {
        Self {
            renderer,
            encoder,
            share_target,
            downloader,
            overlay: None,
            options: RenderOptions::default(),
            share: ShareSettings::default(),
            filename: DEFAULT_FILENAME.to_string(),
            busy: AtomicBool::new(false),
        }
    }

    /// Applies render, share and file name settings from configuration.
    pub fn with_config(mut self, config: &AppConfig) -> Result<Self, ExportError> {
        self.options = RenderOptions::try_from(&config.export.render)?;
        self.share = config.share.clone();
        self.filename = config.export.filename.clone();
        Ok(self)
    }

    /// Sets the image drawn in the bottom-right corner.
    pub fn with_overlay(mut self, overlay: Option<RasterImage>) -> Self {
        self.overlay = overlay;
        self
    }

    /// Overrides the render options.
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns true while an export is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Exports whatever result the form is displaying.
    pub async fn export_form(&self, form: &CalculatorForm) -> Result<ExportOutcome, ExportError> {
        self.export(form.export_target()?).await
    }

    /// Exports one result.
    pub async fn export(&self, result: &CalculationResult) -> Result<ExportOutcome, ExportError> {
        let _guard = BusyGuard::acquire(&self.busy).ok_or(ExportError::Busy)?;
        info!(calculation_id = %result.calculation_id, "Generating share image");

        let screenshot = self.renderer.capture(result, &self.options).await?;
        let composed = composite_share_image(&screenshot, self.overlay.as_ref())?;
        let image = self.encoder.encode(&composed, &self.options).await?;

        let payload = SharePayload {
            title: self.share.title.clone(),
            text: self.share.text_for(&result.score.two_places()),
            filename: self.filename.clone(),
            image,
        };

        self.deliver(payload).await
    }

    async fn deliver(&self, payload: SharePayload) -> Result<ExportOutcome, ExportError> {
        if !self.share_target.can_share_files() {
            let path = self.downloader.save(&payload.filename, &payload.image).await?;
            return Ok(ExportOutcome::Downloaded { path, notice: None });
        }

        match self.share_target.share(&payload).await {
            Ok(()) => {
                info!(filename = %payload.filename, "Share image handed to share target");
                Ok(ExportOutcome::Shared)
            }
            Err(err) => {
                warn!(error = %err, "Sharing failed, falling back to download");
                let path = self.downloader.save(&payload.filename, &payload.image).await?;
                Ok(ExportOutcome::Downloaded {
                    path,
                    notice: Some(SHARE_FALLBACK_NOTICE),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    use crate::export::{CardRenderer, EncodedImage, FileDownloader, PngEncoder, UnavailableShare};
    use crate::models::NumericField;

    struct FakeShare {
        available: bool,
        fails: bool,
        calls: AtomicUsize,
    }

    impl FakeShare {
        fn new(available: bool, fails: bool) -> Self {
            Self {
                available,
                fails,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl ShareTarget for FakeShare {
        fn can_share_files(&self) -> bool {
            self.available
        }

        async fn share(&self, payload: &SharePayload) -> Result<(), ExportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(payload.text, "快来看看我的上班性价比指数：35.29！你也来测测？");
            if self.fails {
                Err(ExportError::Delivery {
                    message: "user cancelled".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    struct BrokenDownloader;

    impl Downloader for BrokenDownloader {
        async fn save(&self, _filename: &str, _image: &EncodedImage) -> Result<PathBuf, ExportError> {
            Err(ExportError::Delivery {
                message: "disk full".to_string(),
            })
        }
    }

    #[derive(Default)]
    struct RecordingEncoder {
        quality: std::sync::Mutex<Option<f32>>,
    }

    impl ImageEncoder for RecordingEncoder {
        async fn encode(
            &self,
            image: &RasterImage,
            options: &RenderOptions,
        ) -> Result<EncodedImage, ExportError> {
            if let Ok(mut seen) = self.quality.lock() {
                *seen = Some(options.quality);
            }
            PngEncoder::new().encode_sync(image, options.quality)
        }
    }

    struct SlowRenderer;

    impl ResultRenderer for SlowRenderer {
        async fn capture(
            &self,
            result: &CalculationResult,
            options: &RenderOptions,
        ) -> Result<RasterImage, ExportError> {
            tokio::task::yield_now().await;
            CardRenderer.render(result, options)
        }
    }

    #[tokio::test]
    async fn test_successful_share_skips_download() {
        let pipeline = ExportPipeline::new(
            CardRenderer,
            PngEncoder::new(),
            FakeShare::new(true, false),
            BrokenDownloader,
        );

        let outcome = pipeline.export_form(&submitted_form()).await.unwrap();
        assert_eq!(outcome, ExportOutcome::Shared);
        assert_eq!(pipeline.share_target.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_share_falls_back_to_download_with_notice() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = ExportPipeline::new(
            CardRenderer,
            PngEncoder::new(),
            FakeShare::new(true, true),
            FileDownloader::new(dir.path()),
        );

        let outcome = pipeline.export_form(&submitted_form()).await.unwrap();
        assert_eq!(
            outcome,
            ExportOutcome::Downloaded {
                path: dir.path().join(DEFAULT_FILENAME),
                notice: Some(SHARE_FALLBACK_NOTICE),
            }
        );
    }

    #[tokio::test]
    async fn test_failed_download_is_surfaced() {
        let pipeline = ExportPipeline::new(
            CardRenderer,
            PngEncoder::new(),
            FakeShare::new(true, true),
            BrokenDownloader,
        );

        let err = pipeline.export_form(&submitted_form()).await.unwrap_err();
        assert!(matches!(err, ExportError::Delivery { .. }));
        assert!(!pipeline.is_busy());
    }

    #[tokio::test]
    async fn test_second_export_while_busy_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = ExportPipeline::new(
            SlowRenderer,
            PngEncoder::new(),
            UnavailableShare,
            FileDownloader::new(dir.path()),
        );
        let form = submitted_form();

        let (first, second) = tokio::join!(pipeline.export_form(&form), pipeline.export_form(&form));

        assert!(first.is_ok());
        assert_eq!(second.unwrap_err(), ExportError::Busy);
        assert!(!pipeline.is_busy());
    }

    #[tokio::test]
    async fn test_result_is_unchanged_by_export() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = ExportPipeline::new(
            CardRenderer,
            PngEncoder::new(),
            UnavailableShare,
            FileDownloader::new(dir.path()),
        );
        let form = submitted_form();
        let before = form.result().cloned();

        pipeline.export_form(&form).await.unwrap();
        assert_eq!(form.result().cloned(), before);
    }

    fn submitted_form() -> CalculatorForm {
        let mut form = CalculatorForm::new();
        form.set_field(NumericField::DailySalary, "300");
        form.set_field(NumericField::WorkHours, "8");
        form.set_field(NumericField::CommuteHours, "1.5");
        form.set_field(NumericField::SlackingHours, "2");
        form.submit();
        form
    }

    #[tokio::test]
    async fn test_export_without_share_facility_downloads() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = ExportPipeline::new(
            CardRenderer,
            PngEncoder::new(),
            UnavailableShare,
            FileDownloader::new(dir.path()),
        );

        let outcome = pipeline.export_form(&submitted_form()).await.unwrap();

        let expected = dir.path().join(DEFAULT_FILENAME);
        assert_eq!(
            outcome,
            ExportOutcome::Downloaded {
                path: expected.clone(),
                notice: None
            }
        );
        assert!(std::fs::read(expected).unwrap().starts_with(b"\x89PNG"));
        assert!(!pipeline.is_busy());
    }

    #[tokio::test]
    async fn test_export_with_no_result_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = ExportPipeline::new(
            CardRenderer,
            PngEncoder::new(),
            UnavailableShare,
            FileDownloader::new(dir.path()),
        );

        let result = pipeline.export_form(&CalculatorForm::new()).await;
        assert_eq!(result.unwrap_err(), ExportError::MissingResult);
    }

    #[tokio::test]
    async fn test_config_sets_filename() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.export.filename = "mine.png".to_string();

        let pipeline = ExportPipeline::new(
            CardRenderer,
            PngEncoder::new(),
            UnavailableShare,
            FileDownloader::new(dir.path()),
        )
        .with_config(&config)
        .unwrap();

        match pipeline.export_form(&submitted_form()).await.unwrap() {
            ExportOutcome::Downloaded { path, .. } => assert_eq!(path, dir.path().join("mine.png")),
            other => panic!("Expected download, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_config_quality_reaches_encoder() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.export.render.quality = 0.3;

        let pipeline = ExportPipeline::new(
            CardRenderer,
            RecordingEncoder::default(),
            UnavailableShare,
            FileDownloader::new(dir.path()),
        )
        .with_config(&config)
        .unwrap();

        pipeline.export_form(&submitted_form()).await.unwrap();
        assert_eq!(*pipeline.encoder.quality.lock().unwrap(), Some(0.3));
    }

    #[test]
    fn test_busy_guard_is_exclusive_and_released() {
        let flag = AtomicBool::new(false);
        {
            let _first = BusyGuard::acquire(&flag).unwrap();
            assert!(BusyGuard::acquire(&flag).is_none());
        }
        assert!(!flag.load(Ordering::Acquire));
        assert!(BusyGuard::acquire(&flag).is_some());
    }
}
