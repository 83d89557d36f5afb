//! Streaming adapter error types.
//!
//! These errors come from the byte source or the message channel around
//! the parser. Malformed input never surfaces here: the parser skips it.

use thiserror::Error;

/// Stream-specific error variants.
#[derive(Debug, Error)]
pub enum StreamError {
    /// Reading from an `AsyncRead` source failed.
    #[error("failed to read from stream: {0}")]
    Io(#[from] std::io::Error),

    /// A chunked byte source yielded an error.
    #[error("stream source error: {message}")]
    Source { message: String },

    /// The consumer dropped its receiver before the stream ended.
    #[error("message receiver dropped")]
    ReceiverDropped,

    /// The background task panicked or was aborted.
    #[error("stream task failed: {message}")]
    TaskFailed { message: String },
}

impl StreamError {
    /// Build a `Source` error from any displayable source failure.
    pub fn from_source(err: impl std::fmt::Display) -> Self {
        StreamError::Source {
            message: err.to_string(),
        }
    }

    /// Whether the failure came from the byte source, in which case any
    /// buffered tail was still flushed to the consumer.
    pub fn is_source_failure(&self) -> bool {
        matches!(self, StreamError::Io(_) | StreamError::Source { .. })
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::Io(_) => "E_STREAM_IO",
            StreamError::Source { .. } => "E_STREAM_SOURCE",
            StreamError::ReceiverDropped => "E_STREAM_RECEIVER",
            StreamError::TaskFailed { .. } => "E_STREAM_TASK",
        }
    }
}

impl From<tokio::task::JoinError> for StreamError {
    fn from(err: tokio::task::JoinError) -> Self {
        StreamError::TaskFailed {
            message: err.to_string(),
        }
    }
}
