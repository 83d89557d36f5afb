//! SSE message and rejection types
//!
//! Contains the `SseMessage` value emitted by the parser and the
//! `SegmentRejection` reasons a delimited segment can be refused for.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Line prefix naming the event type
pub const EVENT_PREFIX: &str = "event:";
/// Line prefix introducing the data payload
pub const DATA_PREFIX: &str = "data:";
/// Blank line separating two messages
pub const MESSAGE_DELIMITER: &str = "\n\n";

/// A fully framed message decoded from one segment of the stream.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SseMessage {
    /// Event type, empty when the emitter sent only `data:` lines
    pub event: String,
    /// Data payload with the leading `data:` stripped. Multi-line payloads
    /// keep their embedded newlines.
    pub data: String,
}

impl SseMessage {
    /// Create a message from an event type and payload.
    pub fn new(event: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            data: data.into(),
        }
    }

    /// Create a message without an event type.
    pub fn data_only(data: impl Into<String>) -> Self {
        Self::new(String::new(), data)
    }

    /// Whether the message carried an `event:` line.
    pub fn has_event(&self) -> bool {
        !self.event.is_empty()
    }
}

/// Why a segment was not accepted as a message.
///
/// Rejections are never fatal. The splitter decides whether a rejected
/// segment is dropped or kept for a later pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SegmentRejection {
    /// First line starts with neither `event:` nor `data:`
    #[error("unrecognized framing: {first_line:?}")]
    UnrecognizedFraming { first_line: String },
    /// `event:` line not followed by a `data:` block
    #[error("missing data for event {event:?}")]
    MissingData { event: String },
    /// Framing is fine but the completion predicate refused the payload
    #[error("data for event {event:?} is not complete")]
    Incomplete { event: String },
}

impl SegmentRejection {
    /// Whether the segment was structurally malformed, as opposed to
    /// refused by the completion predicate.
    pub fn is_malformed(&self) -> bool {
        !matches!(self, SegmentRejection::Incomplete { .. })
    }
}
