//! SSE (Server-Sent Events) parser trait abstraction.
//!
//! Provides a trait-based abstraction for SSE parsing, so the streaming
//! adapter can drive any parser and tests can substitute their own.

use crate::sse::{ParserStats, SseMessage};

/// Trait for incremental SSE parsing.
///
/// The parser is stateful: it buffers text across calls until complete
/// messages can be emitted. A stream is driven as
/// `append* -> flush`, optionally followed by `reset` to reuse the
/// parser for an unrelated stream.
///
/// # Example
///
/// ```
/// use ssefeed::sse::SseParser;
/// use ssefeed::traits::SseParserTrait;
///
/// fn drain<P: SseParserTrait>(parser: &mut P, chunks: &[&str]) -> usize {
///     let mut count = 0;
///     for chunk in chunks {
///         count += parser.append(chunk).len();
///     }
///     count + parser.flush().len()
/// }
///
/// let mut parser = SseParser::new();
/// assert_eq!(drain(&mut parser, &["event:a\ndata:1\n\nda", "ta:2"]), 2);
/// ```
pub trait SseParserTrait: Send {
    /// Feed a chunk of text, returning the messages it completed.
    ///
    /// # Arguments
    /// * `chunk` - Any slice of the stream; boundaries need not align with
    ///   lines or messages
    fn append(&mut self, chunk: &str) -> Vec<SseMessage>;

    /// Signal end of stream and return any message still buffered.
    fn flush(&mut self) -> Vec<SseMessage>;

    /// Reset the parser state.
    ///
    /// This clears any buffered text, useful when starting a new stream.
    fn reset(&mut self);

    /// Counters of emitted and rejected segments.
    fn stats(&self) -> ParserStats {
        ParserStats::default()
    }
}

impl SseParserTrait for crate::sse::SseParser {
    fn append(&mut self, chunk: &str) -> Vec<SseMessage> {
        crate::sse::SseParser::append(self, chunk)
    }

    fn flush(&mut self) -> Vec<SseMessage> {
        crate::sse::SseParser::flush(self)
    }

    fn reset(&mut self) {
        crate::sse::SseParser::reset(self)
    }

    fn stats(&self) -> ParserStats {
        crate::sse::SseParser::stats(self)
    }
}
