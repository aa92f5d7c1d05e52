//! Delivering the encoded image: native share, or a local download.

use std::future::Future;
use std::path::PathBuf;

use tracing::info;

use crate::error::ExportError;

use super::encode::EncodedImage;

/// Everything handed to a share target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    /// Share sheet title.
    pub title: String,
    /// Share message.
    pub text: String,
    /// File name of the attached image.
    pub filename: String,
    /// The attached image.
    pub image: EncodedImage,
}

/// A platform share facility.
pub trait ShareTarget {
    /// Returns true if the target can accept file attachments.
    fn can_share_files(&self) -> bool;

    /// Opens the share facility with `payload`.
    fn share(&self, payload: &SharePayload) -> impl Future<Output = Result<(), ExportError>> + Send;
}

/// A local save facility, used when sharing is unavailable or fails.
pub trait Downloader {
    /// Saves `image` under `filename`, returning where it landed.
    fn save(
        &self,
        filename: &str,
        image: &EncodedImage,
    ) -> impl Future<Output = Result<PathBuf, ExportError>> + Send;
}

/// A platform without a share facility; every export becomes a download.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableShare;

impl ShareTarget for UnavailableShare {
    fn can_share_files(&self) -> bool {
        false
    }

    async fn share(&self, _payload: &SharePayload) -> Result<(), ExportError> {
        Err(ExportError::Delivery {
            message: "no share facility on this platform".to_string(),
        })
    }
}

/// Writes images into a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDownloader {
    dir: PathBuf,
}

impl FileDownloader {
    /// Creates a downloader writing into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The target directory.
    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }
}

impl Downloader for FileDownloader {
    async fn save(&self, filename: &str, image: &EncodedImage) -> Result<PathBuf, ExportError> {
        let name = std::path::Path::new(filename)
            .file_name()
            .ok_or_else(|| ExportError::Delivery {
                message: format!("invalid file name '{}'", filename),
            })?;
        let path = self.dir.join(name);

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| ExportError::Delivery {
                message: format!("cannot create {}: {}", self.dir.display(), e),
            })?;
        tokio::fs::write(&path, &image.bytes)
            .await
            .map_err(|e| ExportError::Delivery {
                message: format!("cannot write {}: {}", path.display(), e),
            })?;

        info!(path = %path.display(), bytes = image.bytes.len(), "Saved share image");
        Ok(path)
    }
}
