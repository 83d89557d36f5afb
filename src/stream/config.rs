//! Streaming adapter configuration.

use tracing::warn;

/// Default number of messages buffered between the read task and the consumer
pub const DEFAULT_CHANNEL_CAPACITY: usize = 100;
/// Default size of a single read from the byte source
pub const DEFAULT_READ_BUFFER_SIZE: usize = 8 * 1024;

/// Environment variable overriding [`StreamConfig::channel_capacity`]
pub const CHANNEL_CAPACITY_ENV: &str = "SSEFEED_CHANNEL_CAPACITY";
/// Environment variable overriding [`StreamConfig::read_buffer_size`]
pub const READ_BUFFER_ENV: &str = "SSEFEED_READ_BUFFER";

/// Configuration for the background stream task.
///
/// Use the builder pattern to customize it.
///
/// # Example
///
/// ```
/// use ssefeed::stream::StreamConfig;
///
/// let config = StreamConfig::default()
///     .with_channel_capacity(16)
///     .with_read_buffer_size(1024);
/// assert_eq!(config.channel_capacity, 16);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamConfig {
    /// Messages held in the channel before the read loop waits (min 1)
    pub channel_capacity: usize,
    /// Bytes requested from the source per read (min 1)
    pub read_buffer_size: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
        }
    }
}

impl StreamConfig {
    /// Create a new StreamConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the channel capacity. Zero is raised to one.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity.max(1);
        self
    }

    /// Set the read buffer size. Zero is raised to one.
    pub fn with_read_buffer_size(mut self, size: usize) -> Self {
        self.read_buffer_size = size.max(1);
        self
    }

    /// Create config from `SSEFEED_CHANNEL_CAPACITY` and `SSEFEED_READ_BUFFER`.
    /// Unset variables keep their defaults; unparsable or zero values are
    /// logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(capacity) = parse_positive(CHANNEL_CAPACITY_ENV, lookup(CHANNEL_CAPACITY_ENV)) {
            config.channel_capacity = capacity;
        }
        if let Some(size) = parse_positive(READ_BUFFER_ENV, lookup(READ_BUFFER_ENV)) {
            config.read_buffer_size = size;
        }
        config
    }
}

fn parse_positive(key: &str, value: Option<String>) -> Option<usize> {
    let value = value?;
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Some(n),
        _ => {
            warn!("Ignoring invalid {}={:?}, using default", key, value);
            None
        }
    }
}
