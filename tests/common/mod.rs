//! Common test utilities for integration tests.
//!
//! Stream generators, chunking helpers, and `AsyncRead` sources that
//! deliver bytes on the test's schedule.

#![allow(dead_code)]

pub mod readers;

#[allow(unused_imports)]
pub use readers::*;

use ssefeed::sse::{CompletionPredicate, SseMessage, SseParser};

/// Terminator used by the sentinel-gated tests.
pub const END: &str = "[END]";

/// Parser that treats a payload as complete once it ends with `[END]`.
pub fn end_parser() -> SseParser {
    SseParser::with_completion(CompletionPredicate::suffix(END))
}

/// `n` messages of the form `event:message / data:hello <i> [END]`.
pub fn numbered_stream(n: usize) -> String {
    (0..n)
        .map(|i| format!("event:message\ndata:hello {} {}\n\n", i, END))
        .collect()
}

/// Expected data payload of message `i` in [`numbered_stream`].
pub fn numbered_data(i: usize) -> String {
    format!("hello {} {}", i, END)
}

/// Split `input` into pieces of at most `size` characters.
pub fn chunks_of(input: &str, size: usize) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    chars
        .chunks(size.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Append every chunk, then flush, collecting all messages.
pub fn feed_all<S: AsRef<str>>(parser: &mut SseParser, chunks: &[S]) -> Vec<SseMessage> {
    let mut messages = Vec::new();
    for chunk in chunks {
        messages.extend(parser.append(chunk.as_ref()));
    }
    messages.extend(parser.flush());
    messages
}
