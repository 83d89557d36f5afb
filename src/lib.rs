//! ssefeed - incremental parsing of line-delimited event streams
//!
//! The core is [`sse::SseParser`], a synchronous parser fed with chunks of
//! any size. [`stream`] runs a parser on a background task and delivers
//! messages over a bounded channel.

pub mod cli;
pub mod error;
pub mod sse;
pub mod stream;
pub mod traits;
