//! Incremental SSE parsing
//!
//! Contains the stateful `SseParser`, which accumulates raw chunks and
//! splits them into delimited segments, and the per-segment decoder.

mod completion;
mod segment;

use tracing::{error, trace};

use crate::sse::events::{SegmentRejection, SseMessage, MESSAGE_DELIMITER};

pub use completion::CompletionPredicate;
pub use segment::{decode_segment, is_blank};

/// Running counts of what the parser has done with segments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserStats {
    /// Segments decoded into messages
    pub emitted: u64,
    /// Segments discarded as malformed or incomplete
    pub rejected: u64,
}

/// Stateful parser that turns arbitrarily chunked text into messages.
///
/// One parser serves one logical stream: feed it with [`append`] as data
/// arrives and call [`flush`] once when the source is exhausted. Every
/// mutating method takes `&mut self`, so a parser is driven by a single
/// owner at a time; move it into a task to drive it from elsewhere.
///
/// The last segment of the buffer is only decoded early when a
/// [`CompletionPredicate`] is configured. Without one, a message is
/// emitted once the blank line after it has been seen, or on `flush`.
///
/// [`append`]: SseParser::append
/// [`flush`]: SseParser::flush
#[derive(Debug, Clone, Default)]
pub struct SseParser {
    /// Text not yet decoded, line endings already normalized
    buffer: String,
    /// Optional in-band completeness check on the data payload
    completion: Option<CompletionPredicate>,
    stats: ParserStats,
}

impl SseParser {
    /// Create a parser that relies on delimiters alone.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser that also requires `completion` to accept each
    /// payload, and may decode the trailing segment as soon as it does.
    pub fn with_completion(completion: impl Into<CompletionPredicate>) -> Self {
        Self {
            completion: Some(completion.into()),
            ..Self::default()
        }
    }

    /// The configured completion predicate, if any.
    pub fn completion(&self) -> Option<&CompletionPredicate> {
        self.completion.as_ref()
    }

    /// Text currently held back waiting for more data.
    pub fn buffered(&self) -> &str {
        &self.buffer
    }

    /// Segment counters since construction or the last reset.
    pub fn stats(&self) -> ParserStats {
        self.stats
    }

    /// Feed a chunk and return every message it completed.
    pub fn append(&mut self, chunk: &str) -> Vec<SseMessage> {
        // A CRLF split across chunks leaves a lone '\r' at the end of the buffer
        if chunk.starts_with('\n') && self.buffer.ends_with('\r') {
            self.buffer.pop();
        }
        self.buffer.push_str(&chunk.replace("\r\n", "\n"));
        self.parse_buffered(false)
    }

    /// Decode whatever is left at the end of the stream.
    ///
    /// A trailing segment that still fails to decode is discarded, since no
    /// more data will arrive to complete it.
    pub fn flush(&mut self) -> Vec<SseMessage> {
        self.parse_buffered(true)
    }

    /// Drop buffered text and counters. The completion predicate is kept.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.stats = ParserStats::default();
    }

    /// Decode a single segment with this parser's completion predicate.
    pub fn decode(&self, segment: &str) -> Option<SseMessage> {
        self.try_decode(segment).ok()
    }

    /// Like [`decode`](SseParser::decode), reporting why a segment was refused.
    pub fn try_decode(&self, segment: &str) -> Result<SseMessage, SegmentRejection> {
        decode_segment(segment, self.completion.as_ref())
    }

    fn parse_buffered(&mut self, is_finish: bool) -> Vec<SseMessage> {
        let buffered = std::mem::take(&mut self.buffer);
        let segments: Vec<&str> = buffered.split(MESSAGE_DELIMITER).collect();

        if segments.iter().all(|segment| is_blank(segment)) {
            return Vec::new();
        }

        let Some((tail, framed)) = segments.split_last() else {
            return Vec::new();
        };

        let mut messages = Vec::new();

        // Everything before the last delimiter is complete or never will be
        for segment in framed.iter().filter(|segment| !is_blank(segment)) {
            match self.try_decode(segment) {
                Ok(message) => {
                    self.stats.emitted += 1;
                    messages.push(message);
                }
                Err(rejection) => {
                    self.stats.rejected += 1;
                    error!("Invalid message ({}): {:?}, skipping", rejection, segment);
                }
            }
        }

        if is_blank(tail) {
            return messages;
        }

        // A trailing '\r' may be half of a CRLF whose '\n' is still in flight
        if !is_finish && (self.completion.is_none() || tail.ends_with('\r')) {
            self.buffer.push_str(tail);
            return messages;
        }

        match self.try_decode(tail) {
            Ok(message) => {
                self.stats.emitted += 1;
                messages.push(message);
            }
            Err(rejection) if is_finish => {
                self.stats.rejected += 1;
                error!(
                    "Invalid last message piece ({}): {:?}, skipping",
                    rejection, tail
                );
            }
            Err(rejection) => {
                trace!("Keeping tail for next chunk: {}", rejection);
                self.buffer.push_str(tail);
            }
        }

        messages
    }
}
