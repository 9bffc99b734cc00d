//! Unified error types for chatstats.
//!
//! This module provides a single [`ChatstatsError`] enum that covers all error
//! cases in the library. This design follows the pattern used by popular crates
//! like `reqwest`, `serde_json`, and `csv`.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get clear, actionable error messages
//! - **Developers** get source error chains for debugging
//!
//! Ingestion errors are also recorded on the [`Analyzer`](crate::Analyzer) as
//! its latest-error value, so callers that ignore the returned `Result` can
//! still inspect what went wrong afterwards. Analytics functions never fail:
//! an empty message sequence yields empty or zeroed results.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatstats operations.
///
/// # Example
///
/// ```rust
/// use chatstats::error::Result;
/// use chatstats::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     // ... operations that may fail
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatstatsError>;

/// The error type for all chatstats operations.
///
/// Every variant corresponds to one failure mode of the ingestion pipeline.
/// Analytics calls never produce these; only ingestion does.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatstatsError {
    /// The input source could not be read.
    ///
    /// This typically happens when:
    /// - The input file doesn't exist
    /// - Permission denied
    /// - The read was interrupted
    #[error("Unreadable source: {0}")]
    UnreadableSource(#[from] io::Error),

    /// The compressed input could not be decompressed.
    #[cfg(feature = "archive")]
    #[error("Corrupt archive: {0}")]
    ArchiveCorrupt(#[from] zip::result::ZipError),

    /// The archive decompressed fine but contained no transcript entry.
    ///
    /// An entry matches if its name contains the chat-export marker
    /// (`_chat`) or, failing that, if it has a `.txt` suffix.
    #[error("No transcript entry found in archive ({entry_count} entries inspected)")]
    NoTranscriptEntry {
        /// How many archive entries were inspected
        entry_count: usize,
    },

    /// The transcript grammar parser rejected the text.
    ///
    /// Contains the grammar being parsed, a description of the failure,
    /// and optionally the file path.
    #[error("Failed to parse {format} transcript{}: {message}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    ParseFailure {
        /// The grammar being parsed (e.g., "WhatsApp TXT")
        format: &'static str,
        /// Description of what's wrong
        message: String,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// The transcript bytes are not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// A second ingestion was requested while one is still in flight.
    ///
    /// The contract defines no interleaving semantics, so the analyzer
    /// refuses rather than guess. The in-flight ingestion is unaffected.
    #[error("An ingestion is already in progress")]
    IngestionInProgress,
}

impl From<std::string::FromUtf8Error> for ChatstatsError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatstatsError::Utf8 {
            context: "transcript decoding".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatstatsError {
    /// Creates a parse failure for the WhatsApp TXT grammar.
    pub fn whatsapp_parse(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        ChatstatsError::ParseFailure {
            format: "WhatsApp TXT",
            message: message.into(),
            path,
        }
    }

    /// Creates a parse failure for an arbitrary grammar.
    pub fn parse_failure(format: &'static str, message: impl Into<String>) -> Self {
        ChatstatsError::ParseFailure {
            format,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a no-transcript-entry error.
    pub fn no_transcript_entry(entry_count: usize) -> Self {
        ChatstatsError::NoTranscriptEntry { entry_count }
    }

    /// Creates a UTF-8 decode error with context.
    pub fn utf8(context: impl Into<String>, source: std::string::FromUtf8Error) -> Self {
        ChatstatsError::Utf8 {
            context: context.into(),
            source,
        }
    }

    /// Returns `true` if this is an unreadable-source error.
    pub fn is_unreadable_source(&self) -> bool {
        matches!(self, ChatstatsError::UnreadableSource(_))
    }

    /// Returns `true` if this is a corrupt-archive error.
    #[cfg(feature = "archive")]
    pub fn is_archive_corrupt(&self) -> bool {
        matches!(self, ChatstatsError::ArchiveCorrupt(_))
    }

    /// Returns `true` if this is a missing-transcript-entry error.
    pub fn is_no_transcript_entry(&self) -> bool {
        matches!(self, ChatstatsError::NoTranscriptEntry { .. })
    }

    /// Returns `true` if this is a parse failure.
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, ChatstatsError::ParseFailure { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
