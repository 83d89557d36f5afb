//! Integration tests for the background stream task and the CLI stream
//! command.

mod common;

use std::io::Write;
use std::time::Duration;

use common::*;
use ssefeed::cli::{stream_to_writer, RunOptions};
use ssefeed::error::StreamError;
use ssefeed::sse::{SseMessage, SseParser};
use ssefeed::stream::{spawn_reader_stream, StreamConfig};

#[tokio::test]
async fn test_long_stream() {
    let n_messages = 1000;
    let input = numbered_stream(n_messages);
    let config = StreamConfig::default().with_channel_capacity(100);

    let stream = spawn_reader_stream(end_parser(), std::io::Cursor::new(input), &config);
    let (messages, summary) = stream.collect_all().await.unwrap();

    assert_eq!(messages.len(), n_messages);
    assert_eq!(summary.messages_forwarded, n_messages as u64);
    assert_eq!(summary.segments_rejected, 0);
    assert_eq!(messages[999].data, numbered_data(999));
}

#[tokio::test]
async fn test_gradual_stream() {
    let n_messages = 200;
    let (input_tx, reader) = ChannelReader::new();
    let mut stream = spawn_reader_stream(end_parser(), reader, &StreamConfig::default());

    for i in 0..n_messages {
        let message = format!("event:message\ndata:{}\n\n", numbered_data(i));
        for b in message.bytes() {
            input_tx.send(vec![b]).unwrap();
        }

        let received = tokio::time::timeout(Duration::from_secs(1), stream.recv())
            .await
            .expect("timed out waiting for message")
            .expect("stream ended early");
        assert_eq!(received.data, numbered_data(i));
    }

    drop(input_tx);
    assert_eq!(stream.recv().await, None);
    let summary = stream.join().await.unwrap();
    assert_eq!(summary.messages_forwarded, n_messages as u64);
}

#[tokio::test]
async fn test_predicate_emits_before_delimiter_arrives() {
    let (input_tx, reader) = ChannelReader::new();
    let mut stream = spawn_reader_stream(end_parser(), reader, &StreamConfig::default());

    input_tx
        .send(b"event:message\ndata:hello [END]".to_vec())
        .unwrap();
    let received = tokio::time::timeout(Duration::from_secs(1), stream.recv())
        .await
        .expect("predicate should release the tail without a delimiter");
    assert_eq!(received, Some(SseMessage::new("message", "hello [END]")));

    drop(input_tx);
    assert_eq!(stream.recv().await, None);
}

#[tokio::test]
async fn test_without_predicate_tail_waits_for_end_of_stream() {
    let (input_tx, reader) = ChannelReader::new();
    let mut stream = spawn_reader_stream(SseParser::new(), reader, &StreamConfig::default());

    input_tx.send(b"event:message\ndata:hello".to_vec()).unwrap();
    let early = tokio::time::timeout(Duration::from_millis(50), stream.recv()).await;
    assert!(early.is_err(), "tail must not be emitted before flush");

    drop(input_tx);
    assert_eq!(
        stream.recv().await,
        Some(SseMessage::new("message", "hello"))
    );
    assert_eq!(stream.recv().await, None);
}

#[tokio::test]
async fn test_read_error_still_flushes_tail() {
    let reader = FailingReader::new("event:a\ndata:1\n\nevent:b\ndata:2");
    let stream = spawn_reader_stream(SseParser::new(), reader, &StreamConfig::default());
    let (mut messages, task) = stream.into_parts();

    assert_eq!(messages.recv().await, Some(SseMessage::new("a", "1")));
    assert_eq!(messages.recv().await, Some(SseMessage::new("b", "2")));
    assert_eq!(messages.recv().await, None);

    let err = task.await.unwrap().unwrap_err();
    assert!(matches!(err, StreamError::Io(_)));
    assert!(err.is_source_failure());
}

#[tokio::test]
async fn test_cli_streams_file_as_json_lines() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "event:message\r\ndata:hello [END]\r\n\r\ngarbage\n\ndata:multi\nline [END]"
    )
    .unwrap();
    file.flush().unwrap();

    let options = RunOptions {
        input: Some(file.path().to_path_buf()),
        sentinel: Some("[END]".to_string()),
        capacity: Some(2),
    };
    let source = tokio::fs::File::open(file.path()).await.unwrap();
    let mut out: Vec<u8> = Vec::new();
    let summary = stream_to_writer(&options, source, &mut out).await.unwrap();

    let output = String::from_utf8(out).unwrap();
    let messages: Vec<SseMessage> = output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(
        messages,
        vec![
            SseMessage::new("message", "hello [END]"),
            SseMessage::data_only("multi\nline [END]"),
        ]
    );
    assert_eq!(summary.segments_rejected, 1);
}

#[tokio::test]
async fn test_cli_reports_read_failure_after_output() {
    let reader = FailingReader::new("data:first\n\n");
    let mut out: Vec<u8> = Vec::new();
    let result = stream_to_writer(&RunOptions::default(), reader, &mut out).await;

    assert!(result.is_err());
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "{\"event\":\"\",\"data\":\"first\"}\n"
    );
}
