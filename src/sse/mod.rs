//! SSE (Server-Sent Events) stream parser
//!
//! Parses an SSE-like text format delivered in arbitrary chunks.
//! The format consists of:
//! - `event:<type>` - optional first line naming the event
//! - `data:<payload>` - payload, running until the end of the message
//! - Empty line - signals end of message
//!
//! # Module structure
//! - `events` - Message and rejection types (SseMessage, SegmentRejection)
//! - `parser` - Parsing logic (SseParser, CompletionPredicate, decode_segment)

mod events;
mod parser;

// Re-export public types
pub use events::{SegmentRejection, SseMessage, DATA_PREFIX, EVENT_PREFIX, MESSAGE_DELIMITER};
pub use parser::{decode_segment, is_blank, CompletionPredicate, ParserStats, SseParser};
