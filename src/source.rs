//! Input source loading.
//!
//! [`SourceInput`] models the user-supplied file-like object: a byte buffer
//! plus a declared name and optional media type. [`load`] turns it into raw
//! transcript text, routing zip input through the
//! [`archive`](crate::archive) extractor and decoding everything else as
//! UTF-8 directly.
//!
//! This is an I/O boundary only; no transcript semantics live here. The two
//! async suspension points of the whole pipeline are the file read in
//! [`SourceInput::from_path`] and (conceptually) the decompression step.
//!
//! # Example
//!
//! ```no_run
//! use chatstats::source::{SourceInput, load};
//!
//! # async fn example() -> chatstats::error::Result<()> {
//! let input = SourceInput::from_path("export.zip").await?;
//! let text = load(&input).await?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use tracing::debug;

use crate::error::Result;

/// Media types that mark a compressed input.
const ZIP_MEDIA_TYPES: &[&str] = &["application/zip", "application/x-zip-compressed"];

/// A user-supplied input: raw bytes plus the metadata needed to decide how
/// to decode them.
#[derive(Debug, Clone)]
pub struct SourceInput {
    /// Raw bytes of the input.
    pub bytes: Vec<u8>,
    /// Declared file name (used for suffix-based format detection).
    pub name: String,
    /// Declared media type, if any (takes priority over the name suffix).
    pub media_type: Option<String>,
}

impl SourceInput {
    /// Creates an input from in-memory bytes and a file name.
    pub fn new(bytes: Vec<u8>, name: impl Into<String>) -> Self {
        Self {
            bytes,
            name: name.into(),
            media_type: None,
        }
    }

    /// Sets the declared media type.
    #[must_use]
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    /// Reads an input from disk asynchronously.
    ///
    /// The media type is inferred from the file extension.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatsError::UnreadableSource`](crate::ChatstatsError::UnreadableSource)
    /// if the file cannot be read.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let media_type = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "zip" => Some("application/zip".to_string()),
                "txt" => Some("text/plain".to_string()),
                _ => None,
            });

        Ok(Self {
            bytes,
            name,
            media_type,
        })
    }

    /// Returns `true` if this input should be treated as a zip archive.
    ///
    /// The declared media type decides when present; otherwise the name
    /// suffix does (case-insensitive `.zip`).
    pub fn is_compressed(&self) -> bool {
        if let Some(media_type) = &self.media_type {
            return ZIP_MEDIA_TYPES.contains(&media_type.as_str());
        }
        self.name.to_lowercase().ends_with(".zip")
    }
}

/// Produces raw transcript text from an input.
///
/// Compressed inputs are routed to the archive extractor, which runs on a
/// blocking task so decompression does not stall the executor; plain inputs
/// are decoded as UTF-8 text.
///
/// # Errors
///
/// Propagates [`archive::extract_transcript`](crate::archive::extract_transcript)
/// failures for compressed inputs, and
/// [`ChatstatsError::Utf8`](crate::ChatstatsError::Utf8) for plain inputs
/// that are not valid UTF-8.
pub async fn load(input: &SourceInput) -> Result<String> {
    if input.is_compressed() {
        debug!(name = %input.name, "loading compressed input");
        #[cfg(feature = "archive")]
        {
            let bytes = input.bytes.clone();
            return tokio::task::spawn_blocking(move || crate::archive::extract_transcript(&bytes))
                .await
                .map_err(|e| {
                    crate::error::ChatstatsError::UnreadableSource(std::io::Error::other(e))
                })?;
        }
        #[cfg(not(feature = "archive"))]
        {
            return Err(crate::error::ChatstatsError::parse_failure(
                "zip archive",
                "archive support is disabled; enable the `archive` feature",
            ));
        }
    }

    debug!(name = %input.name, bytes = input.bytes.len(), "loading plain input");
    String::from_utf8(input.bytes.clone())
        .map_err(|e| crate::error::ChatstatsError::utf8(format!("input '{}'", input.name), e))
}
