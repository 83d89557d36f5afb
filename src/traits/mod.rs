//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`SseParserTrait`] - Incremental Server-Sent Events parsing

pub mod sse;

pub use sse::SseParserTrait;
