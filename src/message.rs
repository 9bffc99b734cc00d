//! Canonical message type for analytics.
//!
//! This module provides [`Message`], the normalized representation of a single
//! chat message. The [`normalize`](crate::normalize) step converts parser
//! output into this structure; every analytics function consumes a slice of it.
//!
//! # Overview
//!
//! A message consists of:
//! - `sender` — a real participant (never a system entry, once normalized)
//! - `message` — the text body, possibly empty (media placeholders and the like)
//! - `timestamp` — the wall-clock time the transcript recorded
//!
//! # Timestamp semantics
//!
//! Chat exports carry local wall-clock times with no timezone marker, so the
//! timestamp is a [`NaiveDateTime`]. The hour-of-day histogram and the
//! calendar bucket keys read this local time directly; no timezone
//! normalization happens anywhere in the pipeline.
//!
//! # Examples
//!
//! ```
//! use chatstats::Message;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 1, 15)
//!     .unwrap()
//!     .and_hms_opt(10, 30, 0)
//!     .unwrap();
//! let msg = Message::new("Alice", "Hello, world!", ts);
//! assert_eq!(msg.sender(), "Alice");
//! assert_eq!(msg.message(), "Hello, world!");
//! assert_eq!(msg.timestamp(), ts);
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A normalized chat message.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `sender` | `String` | Display name of the participant |
/// | `message` | `String` | Text body, may be empty |
/// | `timestamp` | `NaiveDateTime` | Local wall-clock time from the transcript |
///
/// # Invariant
///
/// After [`normalize`](crate::normalize::normalize), `sender` is never empty,
/// never the conversation-title placeholder, and never the self-authored
/// `You` marker.
///
/// # Serialization
///
/// Implements `Serialize` and `Deserialize`; timestamps use chrono's default
/// `%Y-%m-%dT%H:%M:%S` representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Display name of the message author.
    pub sender: String,

    /// Text content of the message.
    ///
    /// May contain newlines for multiline messages. Media attachments
    /// appear as whatever placeholder the export wrote (e.g.
    /// `<Media omitted>`).
    pub message: String,

    /// Local wall-clock time the message was sent, as recorded by the
    /// transcript. At least day-level precision; usually minute-level.
    pub timestamp: NaiveDateTime,
}

impl Message {
    /// Creates a new message.
    pub fn new(
        sender: impl Into<String>,
        message: impl Into<String>,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            sender: sender.into(),
            message: message.into(),
            timestamp,
        }
    }

    /// Returns the sender name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the message body.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the timestamp.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Returns `true` if this message's body is empty or whitespace-only.
    pub fn is_empty(&self) -> bool {
        self.message.trim().is_empty()
    }
}
