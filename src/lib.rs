//! # Chatstats
//!
//! A Rust library for ingesting exported chat transcripts and computing
//! descriptive analytics over them.
//!
//! ## Overview
//!
//! Chatstats takes a transcript export — plain text, or the zip archive the
//! WhatsApp mobile "Export chat" flow produces — and turns it into answers:
//!
//! - **Sender frequency** — message count per participant
//! - **Top senders** — a ranked leaderboard
//! - **Time series** — message volume per calendar day, ISO week, or month,
//!   with empty buckets filled in and the incomplete current period excluded
//! - **Hour histogram** — message count per local hour of day
//!
//! System entries (the conversation title line, self-authored `You` markers)
//! are suppressed during normalization so the analytics describe actual
//! participants only.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatstats::{Analyzer, Granularity};
//!
//! # async fn example() -> chatstats::Result<()> {
//! let mut analyzer = Analyzer::new();
//! analyzer.ingest_path("WhatsApp Chat - Family Group.zip").await?;
//!
//! for entry in analyzer.top_senders(Some(10)) {
//!     println!("{:>6}  {}", entry.count, entry.sender);
//! }
//!
//! for point in analyzer.time_series(Granularity::Week, None) {
//!     println!("{}  {}", point.bucket, point.count);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## In-memory input
//!
//! Inputs don't have to come from disk; anything with bytes and a name works:
//!
//! ```rust
//! use chatstats::{Analyzer, source::SourceInput};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> chatstats::Result<()> {
//! let transcript = "[1/15/24, 10:29:00 AM] Family Group: group created\n\
//!                   [1/15/24, 10:30:00 AM] Alice: Hello!";
//! let input = SourceInput::new(transcript.as_bytes().to_vec(), "chat.txt");
//!
//! let mut analyzer = Analyzer::new();
//! analyzer.ingest(&input).await?;
//! assert_eq!(analyzer.message_count(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Structure
//!
//! - [`analyzer`] — [`Analyzer`], the stateful ingestion-and-analytics engine
//! - [`analytics`] — pure aggregation functions and result types
//!   ([`Granularity`], [`SenderCount`](analytics::SenderCount),
//!   [`TimeSeriesPoint`](analytics::TimeSeriesPoint))
//! - [`source`] — input loading and compressed-vs-plain dispatch
//! - [`archive`] — zip extraction and transcript entry selection
//!   (requires the `archive` feature, on by default)
//! - [`parser`] — the transcript grammar seam
//!   ([`TranscriptParser`](parser::TranscriptParser),
//!   [`ParsedEntry`](parser::ParsedEntry))
//! - [`parsers`] — bundled grammars
//!   ([`WhatsAppParser`](parsers::WhatsAppParser))
//! - [`normalize`] — system-entry suppression and author cleanup
//! - [`message`] — the canonical [`Message`] type
//! - [`error`] — unified error types ([`ChatstatsError`], [`Result`])
//! - [`prelude`] — convenient re-exports

pub mod analytics;
pub mod analyzer;
#[cfg(feature = "archive")]
pub mod archive;
pub mod error;
pub mod message;
pub mod normalize;
pub mod parser;
pub mod parsers;
pub mod source;

// Re-export the main types at the crate root for convenience
pub use analytics::Granularity;
pub use analyzer::Analyzer;
pub use error::{ChatstatsError, Result};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use chatstats::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use crate::Message;
    pub use crate::analyzer::Analyzer;

    // Error types
    pub use crate::error::{ChatstatsError, Result};

    // Analytics result types
    pub use crate::analytics::{Granularity, SenderCount, TimeSeriesPoint};

    // Input handling
    pub use crate::source::SourceInput;

    // Grammar seam
    pub use crate::parser::{ParsedEntry, TranscriptParser};
    pub use crate::parsers::WhatsAppParser;
}
