//! Image attachment model and validation

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Extensions the file dialog offers and the validator accepts
pub const ACCEPTED_EXTENSIONS: [&str; 4] = ["jpeg", "jpg", "png", "gif"];

/// Size ceiling for animated GIFs, in megabytes
pub const GIF_LIMIT_MB: f64 = 15.0;

/// Size ceiling for every other accepted format, in megabytes
pub const IMAGE_LIMIT_MB: f64 = 5.0;

/// A user-selected image, read into memory for a single post attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageAttachment {
    /// Where the file came from
    pub path: PathBuf,
    /// File contents, base64-encoded for the upload call
    pub base64_data: String,
    /// File size in megabytes
    pub size_mb: f64,
    /// Lowercased extension with leading dot, e.g. `.png`
    pub extension: String,
}

impl ImageAttachment {
    /// Read a file into an attachment
    ///
    /// The contents are base64-encoded and the size computed in megabytes;
    /// no validation happens here, call [`Self::validate`] before handing
    /// the attachment to the publisher.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read image {}", path.display()))?;

        #[allow(clippy::cast_precision_loss)]
        let size_mb = bytes.len() as f64 / (1024.0 * 1024.0);

        let extension = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
            .unwrap_or_default();

        Ok(Self {
            path: path.to_path_buf(),
            base64_data: STANDARD.encode(&bytes),
            size_mb,
            extension,
        })
    }

    /// Check the attachment against the format and size rules
    ///
    /// GIFs must be under [`GIF_LIMIT_MB`], everything else under
    /// [`IMAGE_LIMIT_MB`]. A violation blocks the attachment entirely; the
    /// post is never sent without it.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let known = ACCEPTED_EXTENSIONS
            .iter()
            .any(|ext| self.extension == format!(".{ext}"));
        if !known {
            return Err(ValidationError::UnsupportedFormat {
                extension: self.extension.clone(),
            });
        }

        let limit_mb = if self.extension == ".gif" {
            GIF_LIMIT_MB
        } else {
            IMAGE_LIMIT_MB
        };
        if self.size_mb >= limit_mb {
            return Err(ValidationError::TooLarge {
                extension: self.extension.clone(),
                size_mb: self.size_mb,
                limit_mb,
            });
        }

        Ok(())
    }
}
