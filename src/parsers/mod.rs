//! Bundled transcript grammar parsers.
//!
//! Currently one grammar is bundled: [`WhatsAppParser`] for WhatsApp TXT
//! exports, which is also the [`Analyzer`](crate::Analyzer) default.
//! Anything implementing [`TranscriptParser`](crate::parser::TranscriptParser)
//! can replace it.

mod whatsapp;

pub use whatsapp::WhatsAppParser;
