//! The ingestion-and-analytics engine.
//!
//! [`Analyzer`] owns the canonical message sequence and exposes the
//! analytics projections over it. Ingestion runs the full pipeline:
//!
//! ```text
//! raw input -> source loader -> [archive extractor] -> transcript parser
//!           -> normalizer -> canonical messages
//! ```
//!
//! # State model
//!
//! The stored sequence is replaced wholesale on successful ingestion and
//! left untouched on failure, so analytics always observe either the
//! previous complete sequence or the new complete one, never a partial one.
//! Nothing is cached; every analytics call recomputes from the stored
//! sequence.
//!
//! Ingestion is serialized: a second ingestion while one is in flight is
//! refused with [`ChatstatsError::IngestionInProgress`]. There is no
//! cancellation; an ingestion runs to completion or failure, and the busy
//! flag is cleared on every exit path.
//!
//! # Example
//!
//! ```no_run
//! use chatstats::{Analyzer, Granularity};
//!
//! # async fn example() -> chatstats::error::Result<()> {
//! let mut analyzer = Analyzer::new();
//! analyzer.ingest_path("export.zip").await?;
//!
//! for entry in analyzer.top_senders(Some(5)) {
//!     println!("{}: {}", entry.sender, entry.count);
//! }
//! for point in analyzer.time_series(Granularity::Day, None) {
//!     println!("{}: {}", point.bucket, point.count);
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, warn};

use crate::Message;
use crate::analytics::{self, Granularity, SenderCount, TimeSeriesPoint};
use crate::error::{ChatstatsError, Result};
use crate::normalize::normalize;
use crate::parser::TranscriptParser;
use crate::parsers::WhatsAppParser;
use crate::source::{self, SourceInput};

/// Ingests chat transcripts and answers analytics queries over them.
pub struct Analyzer {
    parser: Box<dyn TranscriptParser>,
    messages: Vec<Message>,
    busy: bool,
    last_error: Option<ChatstatsError>,
}

impl Analyzer {
    /// Creates an analyzer with the default WhatsApp TXT grammar.
    pub fn new() -> Self {
        Self::with_parser(Box::new(WhatsAppParser::new()))
    }

    /// Creates an analyzer with a custom transcript grammar.
    pub fn with_parser(parser: Box<dyn TranscriptParser>) -> Self {
        Self {
            parser,
            messages: Vec::new(),
            busy: false,
            last_error: None,
        }
    }

    // =========================================================================
    // Ingestion
    // =========================================================================

    /// Ingests a source, replacing the stored message sequence on success.
    ///
    /// Returns the number of canonical messages. On failure the previous
    /// sequence stays in place, the error is recorded as the latest-error
    /// value, and the same error is returned.
    ///
    /// # Errors
    ///
    /// - [`ChatstatsError::IngestionInProgress`] if called re-entrantly
    /// - Any pipeline error: unreadable source, corrupt archive, missing
    ///   transcript entry, parse failure, invalid UTF-8
    pub async fn ingest(&mut self, input: &SourceInput) -> Result<usize> {
        if self.busy {
            return Err(ChatstatsError::IngestionInProgress);
        }
        self.busy = true;
        let outcome = self.run_pipeline(input).await;
        self.busy = false;

        match outcome {
            Ok(messages) => {
                debug!(
                    source = %input.name,
                    messages = messages.len(),
                    parser = self.parser.name(),
                    "ingestion complete"
                );
                let count = messages.len();
                self.messages = messages;
                self.last_error = None;
                Ok(count)
            }
            Err(err) => {
                warn!(source = %input.name, error = %err, "ingestion failed");
                self.last_error = Some(Self::clone_error(&err));
                Err(err)
            }
        }
    }

    /// Reads a file and ingests it. See [`ingest`](Self::ingest).
    pub async fn ingest_path(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        if self.busy {
            return Err(ChatstatsError::IngestionInProgress);
        }
        let input = match SourceInput::from_path(path).await {
            Ok(input) => input,
            Err(err) => {
                self.last_error = Some(Self::clone_error(&err));
                return Err(err);
            }
        };
        self.ingest(&input).await
    }

    async fn run_pipeline(&self, input: &SourceInput) -> Result<Vec<Message>> {
        let text = source::load(input).await?;
        let entries = self.parser.parse_str(&text)?;
        Ok(normalize(entries))
    }

    // ChatstatsError is not Clone (io::Error and ZipError are not), so the
    // recorded copy is rebuilt variant by variant, keeping the kind and the
    // display form even where the inner error cannot be cloned structurally.
    fn clone_error(err: &ChatstatsError) -> ChatstatsError {
        match err {
            ChatstatsError::UnreadableSource(e) => {
                ChatstatsError::UnreadableSource(std::io::Error::new(e.kind(), e.to_string()))
            }
            #[cfg(feature = "archive")]
            ChatstatsError::ArchiveCorrupt(e) => ChatstatsError::ArchiveCorrupt(
                zip::result::ZipError::Io(std::io::Error::other(e.to_string())),
            ),
            ChatstatsError::NoTranscriptEntry { entry_count } => {
                ChatstatsError::no_transcript_entry(*entry_count)
            }
            ChatstatsError::ParseFailure {
                format,
                message,
                path,
            } => ChatstatsError::ParseFailure {
                format: *format,
                message: message.clone(),
                path: path.clone(),
            },
            ChatstatsError::Utf8 { context, source } => ChatstatsError::Utf8 {
                context: context.clone(),
                source: source.clone(),
            },
            ChatstatsError::IngestionInProgress => ChatstatsError::IngestionInProgress,
        }
    }

    // =========================================================================
    // State accessors
    // =========================================================================

    /// Returns the canonical message sequence.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the number of canonical messages.
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` while an ingestion is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Returns the most recent ingestion error, if the last ingestion failed.
    ///
    /// Cleared by the next successful ingestion.
    pub fn last_error(&self) -> Option<&ChatstatsError> {
        self.last_error.as_ref()
    }

    // =========================================================================
    // Analytics projections
    // =========================================================================

    /// Message count per sender, unordered.
    pub fn sender_frequency(&self) -> HashMap<String, u64> {
        analytics::sender_frequency(&self.messages)
    }

    /// Sender leaderboard, count descending. See [`analytics::top_senders`].
    pub fn top_senders(&self, limit: Option<usize>) -> Vec<SenderCount> {
        analytics::top_senders(&self.messages, limit)
    }

    /// Calendar-bucketed time series. See [`analytics::time_series`].
    pub fn time_series(
        &self,
        granularity: Granularity,
        sender: Option<&str>,
    ) -> Vec<TimeSeriesPoint> {
        analytics::time_series(&self.messages, granularity, sender)
    }

    /// Messages per local hour of day, 24 slots.
    pub fn hour_histogram(&self) -> [u64; 24] {
        analytics::hour_histogram(&self.messages)
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}
