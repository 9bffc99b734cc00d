//! WhatsApp TXT export grammar.
//!
//! WhatsApp exports vary by locale. This parser auto-detects the format
//! by analyzing the first 20 lines of the file.
//!
//! Supported formats:
//! - US: `[1/15/24, 10:30:45 AM] Sender: Message`
//! - EU: `[15.01.24, 10:30:45] Sender: Message`
//! - EU2: `15/01/2024, 10:30 - Sender: Message`
//! - RU: `15.01.2024, 10:30 - Sender: Message`
//!
//! Unlike a general export converter, this parser deliberately keeps system
//! entries (the opening title line, encryption notices attributed to the
//! group name, the `You` marker): the normalizer needs the chronologically
//! first entry intact to identify the conversation-title placeholder, and
//! suppression of non-participants is its job, not the grammar's.

use chrono::NaiveDateTime;
use regex::Regex;

use crate::error::{ChatstatsError, Result};
use crate::parser::{ParsedEntry, TranscriptParser};

/// How many leading lines format auto-detection samples.
const DETECT_SAMPLE_LINES: usize = 20;

/// Parser for WhatsApp TXT exports.
///
/// # Example
///
/// ```
/// use chatstats::parsers::WhatsAppParser;
/// use chatstats::parser::TranscriptParser;
///
/// let parser = WhatsAppParser::new();
/// let entries = parser.parse_str("[1/15/24, 10:30:00 AM] Alice: Hello")?;
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].author, "Alice");
/// # Ok::<(), chatstats::ChatstatsError>(())
/// ```
#[derive(Debug, Default)]
pub struct WhatsAppParser;

impl WhatsAppParser {
    /// Creates a new parser.
    pub fn new() -> Self {
        Self
    }
}

/// Detected date format variants.
#[derive(Debug, Clone, Copy, PartialEq)]
enum DateFormat {
    /// US format: M/D/YY or M/D/YYYY with optional AM/PM
    /// Example: [1/15/24, 10:30:45 AM]
    US,
    /// EU format with dots in brackets: DD.MM.YY or DD.MM.YYYY
    /// Example: [15.01.24, 10:30:45]
    EuDotBracketed,
    /// EU format with dots, no brackets: DD.MM.YYYY
    /// Example: 26.10.2025, 20:40 - Sender: Message
    EuDotNoBracket,
    /// EU format with slashes, no brackets: DD/MM/YYYY
    /// Example: 15/01/2024, 10:30 -
    EuSlash,
    /// Bracketed EU with slashes
    /// Example: [15/01/2024, 10:30:45]
    EuSlashBracketed,
}

impl DateFormat {
    /// Returns regex pattern for this date format.
    ///
    /// The leading `\u{200E}?` tolerates the left-to-right mark iOS
    /// prepends to some exported lines.
    fn pattern(self) -> &'static str {
        match self {
            // [1/15/24, 10:30:45 AM] Sender: Message
            DateFormat::US => {
                r"^\u{200E}?\[(\d{1,2}/\d{1,2}/\d{2,4}),\s(\d{1,2}:\d{2}(?::\d{2})?(?:\s?[APap][Mm])?)\]\s([^:]+):\s?(.*)"
            }
            // [15.01.24, 10:30:45] Sender: Message
            DateFormat::EuDotBracketed => {
                r"^\u{200E}?\[(\d{2}\.\d{2}\.\d{2,4}),\s(\d{2}:\d{2}(?::\d{2})?)\]\s([^:]+):\s?(.*)"
            }
            // 26.10.2025, 20:40 - Sender: Message
            DateFormat::EuDotNoBracket => {
                r"^(\d{2}\.\d{2}\.\d{2,4}),\s(\d{2}:\d{2}(?::\d{2})?)\s-\s([^:]+):\s?(.*)"
            }
            // 15/01/2024, 10:30 - Sender: Message
            DateFormat::EuSlash => {
                r"^(\d{2}/\d{2}/\d{2,4}),\s(\d{2}:\d{2}(?::\d{2})?)\s-\s([^:]+):\s?(.*)"
            }
            // [15/01/2024, 10:30:45] Sender: Message
            DateFormat::EuSlashBracketed => {
                r"^\u{200E}?\[(\d{2}/\d{2}/\d{2,4}),\s(\d{2}:\d{2}(?::\d{2})?)\]\s([^:]+):\s?(.*)"
            }
        }
    }

    /// Returns date parsing format strings for chrono.
    fn date_parse_formats(self) -> &'static [&'static str] {
        match self {
            DateFormat::US => &[
                "%m/%d/%y, %I:%M:%S %p",
                "%m/%d/%y, %I:%M %p",
                "%m/%d/%Y, %I:%M:%S %p",
                "%m/%d/%Y, %I:%M %p",
                "%m/%d/%y, %H:%M:%S",
                "%m/%d/%y, %H:%M",
                "%m/%d/%Y, %H:%M:%S",
                "%m/%d/%Y, %H:%M",
            ],
            DateFormat::EuDotBracketed | DateFormat::EuDotNoBracket => &[
                "%d.%m.%y, %H:%M:%S",
                "%d.%m.%y, %H:%M",
                "%d.%m.%Y, %H:%M:%S",
                "%d.%m.%Y, %H:%M",
            ],
            DateFormat::EuSlash | DateFormat::EuSlashBracketed => &[
                "%d/%m/%y, %H:%M:%S",
                "%d/%m/%y, %H:%M",
                "%d/%m/%Y, %H:%M:%S",
                "%d/%m/%Y, %H:%M",
            ],
        }
    }
}

/// Detection patterns for format auto-detection.
struct FormatDetector {
    format: DateFormat,
    regex: Regex,
}

impl FormatDetector {
    fn new(format: DateFormat) -> Self {
        Self {
            format,
            regex: Regex::new(format.pattern()).unwrap(),
        }
    }

    fn matches(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }
}

/// Auto-detect date format by analyzing first N lines.
fn detect_format(lines: &[&str]) -> Option<DateFormat> {
    let detectors = [
        FormatDetector::new(DateFormat::US),
        FormatDetector::new(DateFormat::EuDotBracketed),
        FormatDetector::new(DateFormat::EuDotNoBracket),
        FormatDetector::new(DateFormat::EuSlash),
        FormatDetector::new(DateFormat::EuSlashBracketed),
    ];

    let mut scores = [0usize; 5];

    for line in lines {
        for (i, detector) in detectors.iter().enumerate() {
            if detector.matches(line) {
                scores[i] += 1;
            }
        }
    }

    let max_score = *scores.iter().max()?;
    if max_score == 0 {
        return None;
    }

    let winner_idx = scores.iter().position(|&s| s == max_score)?;
    Some(detectors[winner_idx].format)
}

/// Parse timestamp from date and time strings.
fn parse_timestamp(date_str: &str, time_str: &str, format: DateFormat) -> Option<NaiveDateTime> {
    let datetime_str = format!("{date_str}, {time_str}");

    for parse_format in format.date_parse_formats() {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&datetime_str, parse_format) {
            return Some(naive);
        }
    }

    None
}

impl WhatsAppParser {
    fn parse_content(&self, content: &str) -> Result<Vec<ParsedEntry>> {
        let lines: Vec<&str> = content.lines().collect();

        if lines.iter().all(|line| line.trim().is_empty()) {
            return Ok(vec![]);
        }

        // Step 1: Auto-detect format from first 20 lines
        let sample_size = std::cmp::min(DETECT_SAMPLE_LINES, lines.len());
        let format = detect_format(&lines[..sample_size]).ok_or_else(|| {
            ChatstatsError::whatsapp_parse(
                "Could not detect WhatsApp export format. \
                 Make sure the file is a valid WhatsApp chat export.",
                None,
            )
        })?;

        // Step 2: Compile regex for detected format
        let regex = Regex::new(format.pattern())
            .map_err(|e| ChatstatsError::whatsapp_parse(e.to_string(), None))?;

        // Step 3: Parse all lines
        let mut entries: Vec<ParsedEntry> = Vec::new();

        for line in &lines {
            if line.trim().is_empty() {
                continue;
            }

            if let Some(caps) = regex.captures(line) {
                // New entry starts
                let date_str = caps.get(1).map_or("", |m| m.as_str());
                let time_str = caps.get(2).map_or("", |m| m.as_str());
                let author = caps.get(3).map_or("", |m| m.as_str());
                let body = caps.get(4).map_or("", |m| m.as_str());

                // Lines that matched the grammar but not any chrono format
                // are malformed timestamps; they are dropped rather than
                // guessed at.
                let Some(date) = parse_timestamp(date_str, time_str, format) else {
                    continue;
                };

                entries.push(ParsedEntry::new(author, body, date));
            } else {
                // Continuation of previous entry (multiline)
                if let Some(last) = entries.last_mut() {
                    last.message.push('\n');
                    last.message.push_str(line);
                }
                // If no previous entry, skip orphan line
            }
        }

        Ok(entries)
    }
}

impl TranscriptParser for WhatsAppParser {
    fn name(&self) -> &'static str {
        "WhatsApp TXT"
    }

    fn parse_str(&self, text: &str) -> Result<Vec<ParsedEntry>> {
        self.parse_content(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parser_name() {
        let parser = WhatsAppParser::new();
        assert_eq!(parser.name(), "WhatsApp TXT");
    }

    #[test]
    fn test_detect_format_us() {
        let lines = vec![
            "[1/15/24, 10:30:45 AM] Alice: Hello",
            "[1/15/24, 10:31:00 AM] Bob: Hi there",
        ];
        assert_eq!(detect_format(&lines), Some(DateFormat::US));
    }

    #[test]
    fn test_detect_format_eu_dot_bracketed() {
        let lines = vec![
            "[15.01.24, 10:30:45] Alice: Hello",
            "[15.01.24, 10:31:00] Bob: Hi there",
        ];
        assert_eq!(detect_format(&lines), Some(DateFormat::EuDotBracketed));
    }

    #[test]
    fn test_detect_format_eu_dot_no_bracket() {
        let lines = vec![
            "26.10.2025, 20:40 - Alice: Hello",
            "26.10.2025, 20:41 - Bob: Hi there",
        ];
        assert_eq!(detect_format(&lines), Some(DateFormat::EuDotNoBracket));
    }

    #[test]
    fn test_detect_format_eu_slash() {
        let lines = vec![
            "15/01/2024, 10:30 - Alice: Hello",
            "15/01/2024, 10:31 - Bob: Hi there",
        ];
        assert_eq!(detect_format(&lines), Some(DateFormat::EuSlash));
    }

    #[test]
    fn test_parse_timestamp_us() {
        let ts = parse_timestamp("1/15/24", "10:30:45 AM", DateFormat::US);
        assert!(ts.is_some());
    }

    #[test]
    fn test_parse_timestamp_eu_dot() {
        let ts = parse_timestamp("15.01.24", "10:30:45", DateFormat::EuDotBracketed);
        assert!(ts.is_some());

        let ts2 = parse_timestamp("26.10.2025", "20:40", DateFormat::EuDotNoBracket);
        assert!(ts2.is_some());
    }

    #[test]
    fn test_parse_simple_transcript() {
        let text = "[1/15/24, 10:30:00 AM] Alice: Hello\n[1/15/24, 10:31:00 AM] Bob: Hi";
        let entries = WhatsAppParser::new().parse_str(text).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].author, "Alice");
        assert_eq!(entries[1].author, "Bob");
        assert_eq!(entries[0].date.hour(), 10);
    }

    #[test]
    fn test_multiline_continuation() {
        let text = "[1/15/24, 10:30:00 AM] Alice: line one\nline two\nline three";
        let entries = WhatsAppParser::new().parse_str(text).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "line one\nline two\nline three");
    }

    #[test]
    fn test_system_lines_are_kept() {
        // Title line and "You" marker survive parsing; suppression happens
        // later, in normalization.
        let text = "\u{200E}[1/15/24, 10:29:00 AM] Family Group: Messages and calls are end-to-end encrypted.\n\
                    [1/15/24, 10:30:00 AM] \u{200E}You: created this group\n\
                    [1/15/24, 10:31:00 AM] Alice: Hello";
        let entries = WhatsAppParser::new().parse_str(text).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].author, "Family Group");
        assert_eq!(entries[2].author, "Alice");
    }

    #[test]
    fn test_empty_input() {
        let entries = WhatsAppParser::new().parse_str("").unwrap();
        assert!(entries.is_empty());
        let entries = WhatsAppParser::new().parse_str("\n  \n").unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_undetectable_format_is_parse_failure() {
        let err = WhatsAppParser::new()
            .parse_str("this is not a chat export at all")
            .unwrap_err();
        assert!(err.is_parse_failure());
    }
}
