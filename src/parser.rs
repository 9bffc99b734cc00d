//! Transcript grammar parser seam.
//!
//! The analytics pipeline treats the transcript grammar as a black box: some
//! collaborator turns raw transcript text into a sequence of
//! `{author, message, date}` triples, and everything downstream (normalization,
//! analytics) only ever sees those triples.
//!
//! This module defines that seam: [`ParsedEntry`] is the triple, and
//! [`TranscriptParser`] is the trait a grammar implementation fulfils. The
//! crate ships one implementation, [`WhatsAppParser`](crate::parsers::WhatsAppParser),
//! which the [`Analyzer`](crate::Analyzer) uses by default; callers with a
//! different export grammar plug in their own.
//!
//! # Example
//!
//! ```
//! use chatstats::parser::{ParsedEntry, TranscriptParser};
//! use chatstats::error::Result;
//! use chrono::NaiveDate;
//!
//! struct OneLiner;
//!
//! impl TranscriptParser for OneLiner {
//!     fn name(&self) -> &'static str {
//!         "OneLiner"
//!     }
//!
//!     fn parse_str(&self, _text: &str) -> Result<Vec<ParsedEntry>> {
//!         let date = NaiveDate::from_ymd_opt(2024, 1, 1)
//!             .unwrap()
//!             .and_hms_opt(9, 0, 0)
//!             .unwrap();
//!         Ok(vec![ParsedEntry::new("Alice", "hi", date)])
//!     }
//! }
//! ```

use chrono::NaiveDateTime;

use crate::error::Result;

/// One raw entry produced by a transcript grammar parser.
///
/// Entries are *pre-normalization*: the author may carry invisible
/// whitespace, may be the conversation-title placeholder, or may be the
/// self-authored `You` marker. [`normalize`](crate::normalize::normalize)
/// turns surviving entries into canonical [`Message`](crate::Message)s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEntry {
    /// Author field exactly as the grammar captured it.
    pub author: String,
    /// Message body, possibly multiline.
    pub message: String,
    /// Local wall-clock time of the entry.
    pub date: NaiveDateTime,
}

impl ParsedEntry {
    /// Creates a new parsed entry.
    pub fn new(
        author: impl Into<String>,
        message: impl Into<String>,
        date: NaiveDateTime,
    ) -> Self {
        Self {
            author: author.into(),
            message: message.into(),
            date,
        }
    }
}

/// Trait for transcript grammar parsers.
///
/// Implementations tokenize one export grammar (line-based, timestamp-
/// delimited, whatever the platform produces) into [`ParsedEntry`] triples.
/// Failures surface as [`ChatstatsError::ParseFailure`](crate::ChatstatsError::ParseFailure)
/// and propagate out of ingestion unchanged.
///
/// Entries should be returned in transcript order; the normalizer relies on
/// the chronologically-first entry to identify the conversation-title
/// placeholder.
pub trait TranscriptParser: Send + Sync {
    /// Returns the human-readable name of this grammar.
    fn name(&self) -> &'static str;

    /// Parses transcript text into entries.
    fn parse_str(&self, text: &str) -> Result<Vec<ParsedEntry>>;
}
