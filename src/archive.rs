//! Zip archive extraction for compressed transcript exports.
//!
//! WhatsApp's "Export chat" on mobile produces a zip containing the
//! transcript (canonically named `_chat.txt`) alongside any exported media.
//! [`extract_transcript`] decompresses the buffer and selects the transcript
//! entry:
//!
//! 1. An entry whose name contains the `_chat` marker wins.
//! 2. Otherwise, the first entry with a `.txt` suffix.
//!
//! Directory entries never match. Selection failures surface as
//! [`ChatstatsError::NoTranscriptEntry`]; decompression failures as
//! [`ChatstatsError::ArchiveCorrupt`].

use std::io::{Cursor, Read};

use tracing::debug;
use zip::ZipArchive;

use crate::error::{ChatstatsError, Result};

/// Name fragment that marks the canonical chat export entry.
const CHAT_MARKER: &str = "_chat";

/// Suffix that marks a plain-text fallback entry.
const TEXT_SUFFIX: &str = ".txt";

/// Extracts the transcript text from a compressed byte buffer.
///
/// # Example
///
/// ```no_run
/// use chatstats::archive::extract_transcript;
///
/// let bytes = std::fs::read("export.zip")?;
/// let text = extract_transcript(&bytes)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
///
/// - [`ChatstatsError::ArchiveCorrupt`] if the buffer is not a readable zip
///   or an entry fails to decompress
/// - [`ChatstatsError::NoTranscriptEntry`] if no entry matches either
///   selection rule
/// - [`ChatstatsError::Utf8`] if the selected entry is not valid UTF-8
pub fn extract_transcript(bytes: &[u8]) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    let index = select_entry(&mut archive)?;

    let mut entry = archive.by_index(index)?;
    let name = entry.name().to_string();
    let mut raw = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or(0));
    entry
        .read_to_end(&mut raw)
        .map_err(|e| ChatstatsError::ArchiveCorrupt(zip::result::ZipError::Io(e)))?;

    debug!(entry = %name, bytes = raw.len(), "extracted transcript entry");

    String::from_utf8(raw).map_err(|e| ChatstatsError::utf8(format!("archive entry '{name}'"), e))
}

/// Picks the transcript entry index: `_chat` marker first, `.txt` fallback.
fn select_entry(archive: &mut ZipArchive<Cursor<&[u8]>>) -> Result<usize> {
    let mut txt_fallback: Option<usize> = None;

    for i in 0..archive.len() {
        let entry = archive.by_index(i)?;
        if entry.is_dir() {
            continue;
        }
        let name = entry.name();

        if name.contains(CHAT_MARKER) {
            return Ok(i);
        }
        if txt_fallback.is_none() && name.to_lowercase().ends_with(TEXT_SUFFIX) {
            txt_fallback = Some(i);
        }
    }

    txt_fallback.ok_or_else(|| ChatstatsError::no_transcript_entry(archive.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::{SimpleFileOptions, ZipWriter};

    fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, data) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_chat_marker_takes_priority() {
        let bytes = build_zip(&[
            ("README.txt", b"not the transcript"),
            ("_chat.txt", b"[1/15/24, 10:30:00 AM] Alice: Hello"),
        ]);
        let text = extract_transcript(&bytes).unwrap();
        assert!(text.contains("Alice"));
    }

    #[test]
    fn test_txt_fallback() {
        let bytes = build_zip(&[
            ("photo.jpg", b"\xff\xd8\xff"),
            ("export.txt", b"[1/15/24, 10:30:00 AM] Bob: Hi"),
        ]);
        let text = extract_transcript(&bytes).unwrap();
        assert!(text.contains("Bob"));
    }

    #[test]
    fn test_marker_beats_earlier_txt() {
        // A plain .txt listed before the marker entry must not win.
        let bytes = build_zip(&[
            ("notes.txt", b"wrong"),
            ("chats/_chat.txt", b"right"),
        ]);
        assert_eq!(extract_transcript(&bytes).unwrap(), "right");
    }

    #[test]
    fn test_no_matching_entry() {
        let bytes = build_zip(&[("photo.jpg", b"\xff\xd8\xff"), ("video.mp4", b"\x00")]);
        let err = extract_transcript(&bytes).unwrap_err();
        assert!(err.is_no_transcript_entry());
    }

    #[test]
    fn test_empty_archive() {
        let bytes = build_zip(&[]);
        let err = extract_transcript(&bytes).unwrap_err();
        assert!(err.is_no_transcript_entry());
    }

    #[test]
    fn test_corrupt_buffer() {
        let err = extract_transcript(b"definitely not a zip").unwrap_err();
        assert!(err.is_archive_corrupt());
    }

    #[test]
    fn test_non_utf8_entry() {
        let bytes = build_zip(&[("_chat.txt", &[0xff, 0xfe, 0xfd])]);
        let err = extract_transcript(&bytes).unwrap_err();
        assert!(matches!(err, ChatstatsError::Utf8 { .. }));
    }
}
