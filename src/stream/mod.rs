//! Background streaming adapter
//!
//! Runs a parser on its own tokio task: the task reads a byte source,
//! feeds it through an [`SseParserTrait`] implementation, and forwards
//! decoded messages onto a bounded channel. After the source ends (or
//! fails) the parser is flushed, the remaining messages are delivered, and
//! the channel is closed.
//!
//! Cancellation is the consumer's call: dropping the receiver stops the
//! read loop at its next send.

mod config;
mod utf8;
mod writer;

use std::fmt::Display;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::BytesMut;
use futures_util::{Stream, StreamExt};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::error;

use crate::error::{StreamError, StreamResult};
use crate::sse::SseMessage;
use crate::traits::SseParserTrait;

pub use config::{
    StreamConfig, CHANNEL_CAPACITY_ENV, DEFAULT_CHANNEL_CAPACITY, DEFAULT_READ_BUFFER_SIZE,
    READ_BUFFER_ENV,
};
pub use utf8::Utf8Accumulator;
pub use writer::MessageWriter;

/// Totals reported by a finished stream task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamSummary {
    /// Raw bytes taken from the source
    pub bytes_read: u64,
    /// Messages delivered to the channel
    pub messages_forwarded: u64,
    /// Segments the parser discarded
    pub segments_rejected: u64,
}

/// Handle to a running stream task.
///
/// Messages are received in stream order. `SseStream` is also a
/// [`Stream`] of messages that ends when the task closes the
/// channel.
pub struct SseStream {
    messages: mpsc::Receiver<SseMessage>,
    task: JoinHandle<StreamResult<StreamSummary>>,
}

impl SseStream {
    /// Receive the next message, or `None` once the stream has ended.
    pub async fn recv(&mut self) -> Option<SseMessage> {
        self.messages.recv().await
    }

    /// Get a reference to the message receiver for use with select!
    pub fn receiver(&mut self) -> &mut mpsc::Receiver<SseMessage> {
        &mut self.messages
    }

    /// Split into the message receiver and the task handle.
    pub fn into_parts(
        self,
    ) -> (
        mpsc::Receiver<SseMessage>,
        JoinHandle<StreamResult<StreamSummary>>,
    ) {
        (self.messages, self.task)
    }

    /// Drain every message, then wait for the task.
    pub async fn collect_all(mut self) -> StreamResult<(Vec<SseMessage>, StreamSummary)> {
        let mut messages = Vec::new();
        while let Some(message) = self.messages.recv().await {
            messages.push(message);
        }
        let summary = self.task.await??;
        Ok((messages, summary))
    }

    /// Stop receiving and wait for the task.
    ///
    /// Messages not yet received are discarded; if the task still had
    /// messages to deliver it ends with [`StreamError::ReceiverDropped`].
    pub async fn join(self) -> StreamResult<StreamSummary> {
        let (messages, task) = self.into_parts();
        drop(messages);
        task.await?
    }
}

impl Stream for SseStream {
    type Item = SseMessage;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.messages.poll_recv(cx)
    }
}

/// Spawn a task that streams `reader` through `parser`.
///
/// A read error is logged and returned from the task, after the parser
/// has been flushed so any decodable tail still reaches the consumer.
pub fn spawn_reader_stream<P, R>(parser: P, reader: R, config: &StreamConfig) -> SseStream
where
    P: SseParserTrait + 'static,
    R: AsyncRead + Unpin + Send + 'static,
{
    let (tx, messages) = mpsc::channel(config.channel_capacity.max(1));
    let read_buffer_size = config.read_buffer_size.max(1);

    let task = tokio::spawn(async move {
        let mut reader = reader;
        let mut writer = MessageWriter::new(parser, tx);
        let mut buf = BytesMut::with_capacity(read_buffer_size);

        let read_result = loop {
            buf.clear();
            buf.reserve(read_buffer_size);
            match reader.read_buf(&mut buf).await {
                Ok(0) => break Ok(()),
                Ok(_) => {
                    writer.write(&buf[..]).await?;
                }
                Err(e) => {
                    error!("Error reading from stream: {}", e);
                    break Err(StreamError::from(e));
                }
            }
        };

        let summary = writer.finish().await?;
        read_result.map(|()| summary)
    });

    SseStream { messages, task }
}

/// Spawn a task that streams a chunked byte source (such as an HTTP body)
/// through `parser`.
///
/// The first source error ends reading; the parser is still flushed and
/// the error is returned from the task.
pub fn spawn_byte_stream<P, S, B, E>(parser: P, source: S, config: &StreamConfig) -> SseStream
where
    P: SseParserTrait + 'static,
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Display + Send + 'static,
{
    let (tx, messages) = mpsc::channel(config.channel_capacity.max(1));

    let task = tokio::spawn(async move {
        let mut source = Box::pin(source);
        let mut writer = MessageWriter::new(parser, tx);

        let read_result = loop {
            match source.next().await {
                Some(Ok(chunk)) => {
                    writer.write(chunk.as_ref()).await?;
                }
                Some(Err(e)) => {
                    error!("Error reading from stream: {}", e);
                    break Err(StreamError::from_source(e));
                }
                None => break Ok(()),
            }
        };

        let summary = writer.finish().await?;
        read_result.map(|()| summary)
    });

    SseStream { messages, task }
}
