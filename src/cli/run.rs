//! Streaming command for the ssefeed CLI.
//!
//! Reads the input through the background stream task and writes each
//! message as one line of JSON.

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tracing::info;

use super::args::RunOptions;
use crate::sse::{CompletionPredicate, SseParser};
use crate::stream::{spawn_reader_stream, StreamConfig, StreamSummary};

/// Build the parser described by the options.
pub fn build_parser(options: &RunOptions) -> SseParser {
    match &options.sentinel {
        Some(sentinel) => SseParser::with_completion(CompletionPredicate::suffix(sentinel.clone())),
        None => SseParser::new(),
    }
}

/// Build the stream config: environment first, then command-line overrides.
pub fn build_config(options: &RunOptions) -> StreamConfig {
    let config = StreamConfig::from_env();
    match options.capacity {
        Some(capacity) => config.with_channel_capacity(capacity),
        None => config,
    }
}

/// Stream `reader` to `out` as JSON lines.
///
/// A read failure is returned after every message decoded before it has
/// been written.
pub async fn stream_to_writer<R, W>(
    options: &RunOptions,
    reader: R,
    out: &mut W,
) -> Result<StreamSummary>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin,
{
    let config = build_config(options);
    let mut stream = spawn_reader_stream(build_parser(options), reader, &config);

    while let Some(message) = stream.recv().await {
        let mut line = serde_json::to_string(&message).wrap_err("failed to encode message")?;
        line.push('\n');
        out.write_all(line.as_bytes())
            .await
            .wrap_err("failed to write output")?;
    }
    out.flush().await.wrap_err("failed to write output")?;

    let summary = stream.join().await.wrap_err("stream failed")?;
    info!(
        "Forwarded {} messages ({} bytes read, {} segments rejected)",
        summary.messages_forwarded, summary.bytes_read, summary.segments_rejected
    );
    Ok(summary)
}

/// Handle the default command: stream the file or stdin to stdout.
pub async fn handle_run_command(options: RunOptions) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    match &options.input {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .wrap_err_with(|| format!("failed to open {}", path.display()))?;
            stream_to_writer(&options, file, &mut stdout).await?;
        }
        None => {
            stream_to_writer(&options, tokio::io::stdin(), &mut stdout).await?;
        }
    }
    Ok(())
}
