//! Push side of the streaming adapter.

use tokio::sync::mpsc;
use tracing::debug;

use super::utf8::Utf8Accumulator;
use super::StreamSummary;
use crate::error::{StreamError, StreamResult};
use crate::sse::SseMessage;
use crate::traits::SseParserTrait;

/// Feeds raw bytes through a parser and forwards every completed message
/// onto a bounded channel.
///
/// `write` waits while the channel is full, so a read loop driving the
/// writer slows down to the consumer's pace. Call [`finish`] exactly once
/// at end of input; dropping the writer afterwards closes the channel.
///
/// [`finish`]: MessageWriter::finish
pub struct MessageWriter<P> {
    parser: P,
    tx: mpsc::Sender<SseMessage>,
    decoder: Utf8Accumulator,
    bytes_read: u64,
    messages_forwarded: u64,
}

impl<P: SseParserTrait> MessageWriter<P> {
    pub fn new(parser: P, tx: mpsc::Sender<SseMessage>) -> Self {
        Self {
            parser,
            tx,
            decoder: Utf8Accumulator::new(),
            bytes_read: 0,
            messages_forwarded: 0,
        }
    }

    /// Parse a chunk of bytes and forward the messages it completed.
    ///
    /// Returns the number of bytes consumed, always `bytes.len()`.
    pub async fn write(&mut self, bytes: &[u8]) -> StreamResult<usize> {
        self.bytes_read += bytes.len() as u64;
        let text = self.decoder.push(bytes);
        if !text.is_empty() {
            let messages = self.parser.append(&text);
            self.forward(messages).await?;
        }
        Ok(bytes.len())
    }

    /// Flush the parser, forward the last messages, and report totals.
    pub async fn finish(mut self) -> StreamResult<StreamSummary> {
        let tail = self.decoder.finish();
        let mut messages = if tail.is_empty() {
            Vec::new()
        } else {
            self.parser.append(&tail)
        };
        messages.extend(self.parser.flush());
        self.forward(messages).await?;

        let summary = self.summary();
        debug!(
            "Stream finished: {} bytes, {} messages, {} rejected segments",
            summary.bytes_read, summary.messages_forwarded, summary.segments_rejected
        );
        Ok(summary)
    }

    /// Totals so far.
    pub fn summary(&self) -> StreamSummary {
        StreamSummary {
            bytes_read: self.bytes_read,
            messages_forwarded: self.messages_forwarded,
            segments_rejected: self.parser.stats().rejected,
        }
    }

    async fn forward(&mut self, messages: Vec<SseMessage>) -> StreamResult<()> {
        for message in messages {
            self.tx
                .send(message)
                .await
                .map_err(|_| StreamError::ReceiverDropped)?;
            self.messages_forwarded += 1;
        }
        Ok(())
    }
}
