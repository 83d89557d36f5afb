//! Error types for the streaming adapter.
//!
//! The parser itself has no error path: malformed segments are reported
//! as [`SegmentRejection`](crate::sse::SegmentRejection) values and logged.
//! Failures around it (the byte source, the channel, the task) are
//! [`StreamError`]s.

mod stream;

pub use stream::StreamError;

/// Type alias for Results using StreamError.
pub type StreamResult<T> = Result<T, StreamError>;
