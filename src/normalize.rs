//! Transcript normalization.
//!
//! Converts raw [`ParsedEntry`] triples into the canonical [`Message`]
//! sequence that analytics consume:
//!
//! - Trims ordinary and invisible whitespace from author names. Exports are
//!   littered with NBSP, left-to-right marks, and zero-width characters that
//!   would otherwise split one participant into several.
//! - Identifies the conversation-title placeholder as the author of the
//!   chronologically-first entry (transcripts conventionally open with a
//!   system line attributing itself to the group or contact name) and drops
//!   every entry authored by it.
//! - Drops entries authored by the self-authored `You` marker, including
//!   its invisible-character-prefixed variants.
//! - Drops entries with an empty author.
//!
//! The surviving entries keep their original order; the output is not
//! re-sorted.

use tracing::debug;

use crate::Message;
use crate::parser::ParsedEntry;

/// The self-authored system marker WhatsApp writes for own-device entries.
const SELF_MARKER: &str = "You";

/// Whitespace variants stripped from author ends: ASCII whitespace plus the
/// invisible characters chat exports are known to carry.
const AUTHOR_TRIM: &[char] = &[
    ' ', '\t', '\r', '\n', '\u{00A0}', // no-break space
    '\u{200B}', // zero width space
    '\u{200E}', // left-to-right mark
    '\u{200F}', // right-to-left mark
    '\u{2060}', // word joiner
    '\u{FEFF}', // byte order mark
];

/// Trims visible and invisible whitespace from both ends of an author name.
pub fn clean_author(author: &str) -> &str {
    author.trim_matches(AUTHOR_TRIM)
}

/// Converts parser output into the canonical message sequence.
///
/// # Example
///
/// ```
/// use chatstats::normalize::normalize;
/// use chatstats::parser::ParsedEntry;
/// use chrono::NaiveDate;
///
/// let ts = NaiveDate::from_ymd_opt(2024, 1, 15)
///     .unwrap()
///     .and_hms_opt(10, 0, 0)
///     .unwrap();
/// let entries = vec![
///     ParsedEntry::new("Family Group", "Messages are encrypted", ts),
///     ParsedEntry::new("Alice ", "Hello", ts),
///     ParsedEntry::new("\u{200E}You", "created this group", ts),
/// ];
///
/// let messages = normalize(entries);
/// assert_eq!(messages.len(), 1);
/// assert_eq!(messages[0].sender, "Alice");
/// ```
pub fn normalize(entries: Vec<ParsedEntry>) -> Vec<Message> {
    // The title placeholder is the author of the chronologically first
    // entry, which may not be the first in transcript order.
    let placeholder = entries
        .iter()
        .min_by_key(|e| e.date)
        .map(|e| clean_author(&e.author).to_string());

    let total = entries.len();
    let messages: Vec<Message> = entries
        .into_iter()
        .filter_map(|entry| {
            let sender = clean_author(&entry.author);
            if sender.is_empty() {
                return None;
            }
            if sender == SELF_MARKER {
                return None;
            }
            if placeholder.as_deref() == Some(sender) {
                return None;
            }
            Some(Message::new(sender, entry.message, entry.date))
        })
        .collect();

    debug!(
        parsed = total,
        kept = messages.len(),
        placeholder = placeholder.as_deref().unwrap_or(""),
        "normalized transcript"
    );

    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn ts(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_clean_author_plain() {
        assert_eq!(clean_author("  Alice  "), "Alice");
        assert_eq!(clean_author("Alice"), "Alice");
    }

    #[test]
    fn test_clean_author_invisible() {
        assert_eq!(clean_author("\u{200E}You"), "You");
        assert_eq!(clean_author("\u{00A0}Bob\u{200B}"), "Bob");
        assert_eq!(clean_author("\u{FEFF}\u{200F}Carol"), "Carol");
    }

    #[test]
    fn test_clean_author_preserves_interior() {
        // Interior invisibles are part of the name (emoji joiners, etc.)
        assert_eq!(clean_author("Ann\u{200B}a"), "Ann\u{200B}a");
    }

    #[test]
    fn test_title_placeholder_dropped() {
        let entries = vec![
            ParsedEntry::new("Family Group", "Messages are encrypted", ts(1, 9)),
            ParsedEntry::new("Alice", "Hello", ts(1, 10)),
            ParsedEntry::new("Family Group", "icon changed", ts(1, 11)),
            ParsedEntry::new("Bob", "Hi", ts(1, 12)),
        ];
        let messages = normalize(entries);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, "Alice");
        assert_eq!(messages[1].sender, "Bob");
    }

    #[test]
    fn test_placeholder_is_chronologically_first() {
        // Out-of-order input: the earliest entry defines the placeholder,
        // not the first in the vector.
        let entries = vec![
            ParsedEntry::new("Alice", "Hello", ts(2, 10)),
            ParsedEntry::new("Family Group", "Messages are encrypted", ts(1, 9)),
            ParsedEntry::new("Family Group", "subject changed", ts(3, 9)),
        ];
        let messages = normalize(entries);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, "Alice");
    }

    #[test]
    fn test_you_marker_dropped() {
        let entries = vec![
            ParsedEntry::new("Family Group", "Messages are encrypted", ts(1, 9)),
            ParsedEntry::new("You", "created this group", ts(1, 10)),
            ParsedEntry::new("\u{200E}You", "changed the icon", ts(1, 11)),
            ParsedEntry::new("Alice", "Hello", ts(1, 12)),
        ];
        let messages = normalize(entries);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, "Alice");
    }

    #[test]
    fn test_empty_author_dropped() {
        let entries = vec![
            ParsedEntry::new("Group", "title", ts(1, 9)),
            ParsedEntry::new("   ", "orphan", ts(1, 10)),
            ParsedEntry::new("\u{200E}", "invisible only", ts(1, 11)),
            ParsedEntry::new("Alice", "Hello", ts(1, 12)),
        ];
        let messages = normalize(entries);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, "Alice");
    }

    #[test]
    fn test_order_preserved() {
        let entries = vec![
            ParsedEntry::new("Title", "t", ts(1, 9)),
            ParsedEntry::new("Bob", "1", ts(1, 12)),
            ParsedEntry::new("Alice", "2", ts(1, 10)),
            ParsedEntry::new("Bob", "3", ts(1, 11)),
        ];
        let messages = normalize(entries);
        let bodies: Vec<&str> = messages.iter().map(|m| m.message()).collect();
        assert_eq!(bodies, ["1", "2", "3"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(normalize(vec![]).is_empty());
    }

    #[test]
    fn test_whitespace_variant_of_placeholder_dropped() {
        // "Family Group" with a trailing NBSP is still the placeholder.
        let entries = vec![
            ParsedEntry::new("Family Group", "Messages are encrypted", ts(1, 9)),
            ParsedEntry::new("Family Group\u{00A0}", "icon changed", ts(1, 10)),
            ParsedEntry::new("Alice", "Hello", ts(1, 11)),
        ];
        let messages = normalize(entries);
        assert_eq!(messages.len(), 1);
    }
}
