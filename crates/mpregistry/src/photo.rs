//! Photo loading and resolution.
//!
//! A photo reaches a record in two steps: a selected file is read into a
//! [`PhotoSource::UploadedFile`] by a [`PhotoLoader`], and a validated source
//! is turned into the displayable string kept on the record by a
//! [`PhotoResolver`].

use std::fmt;
use std::path::Path;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::debug;

use crate::error::{Error, Result};
use crate::record::PhotoSource;

/// MIME type used when the extension does not identify one.
const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// A renderable image source: a URL or a `data:` URL with the image inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPhoto(String);

impl ResolvedPhoto {
    /// Wrap an already renderable value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The renderable value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the renderable value.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Whether the image is embedded rather than referenced.
    #[must_use]
    pub fn is_embedded(&self) -> bool {
        self.0.starts_with("data:")
    }
}

impl fmt::Display for ResolvedPhoto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Encode raw image bytes as a `data:` URL.
#[must_use]
pub fn data_url(bytes: &[u8], mime_type: &str) -> String {
    format!("data:{mime_type};base64,{}", STANDARD.encode(bytes))
}

/// Reads a user-selected file into a photo source.
#[async_trait]
pub trait PhotoLoader: Send + Sync {
    /// Read the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PhotoRead`] if the file cannot be read.
    async fn load(&self, path: &Path) -> Result<PhotoSource>;
}

/// Loads photos from the local file system.
///
/// The MIME type is guessed from the file extension. No size or type limit
/// is applied.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsPhotoLoader;

#[async_trait]
impl PhotoLoader for FsPhotoLoader {
    async fn load(&self, path: &Path) -> Result<PhotoSource> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| Error::PhotoRead {
                path: path.to_path_buf(),
                source,
            })?;
        let mime_type = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or(FALLBACK_MIME_TYPE);
        debug!(
            "Loaded photo {} ({} bytes, {})",
            path.display(),
            bytes.len(),
            mime_type
        );
        Ok(PhotoSource::uploaded(bytes, mime_type))
    }
}

/// Turns a validated photo source into its displayable form.
#[async_trait]
pub trait PhotoResolver: Send + Sync {
    /// Resolve `source`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PhotoResolution`] if the source cannot be turned into
    /// a displayable value.
    async fn resolve(&self, source: &PhotoSource) -> Result<ResolvedPhoto>;
}

/// Passes URLs through and embeds uploaded files as `data:` URLs.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlinePhotoResolver;

#[async_trait]
impl PhotoResolver for InlinePhotoResolver {
    async fn resolve(&self, source: &PhotoSource) -> Result<ResolvedPhoto> {
        match source {
            PhotoSource::Url(url) => Ok(ResolvedPhoto::new(url.trim())),
            PhotoSource::UploadedFile { bytes, mime_type } => {
                if bytes.is_empty() {
                    return Err(Error::photo_resolution("the selected file is empty"));
                }
                let bytes = bytes.clone();
                let mime_type = mime_type.clone();
                let encoded = tokio::task::spawn_blocking(move || data_url(&bytes, &mime_type))
                    .await
                    .map_err(|e| Error::photo_resolution(e.to_string()))?;
                Ok(ResolvedPhoto::new(encoded))
            }
        }
    }
}
