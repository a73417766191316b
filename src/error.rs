//! Error types shared across the relay

use thiserror::Error;

/// Invalid or incomplete configuration. Always fatal, never retried.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("weather API key is not set")]
    MissingApiKey,

    #[error("stream URL is not set")]
    MissingStreamUrl,

    #[error("no cities configured")]
    NoCities,

    #[error("duplicate city key '{0}'")]
    DuplicateCityKey(String),

    #[error("invalid city key '{0}': expected lowercase letters, digits and underscores")]
    InvalidCityKey(String),
}

/// Failure to obtain any response from the upstream API
#[derive(Debug, Error)]
pub enum FetchError {
    /// A single attempt failed at the transport level (connect, timeout, ...)
    #[error("request failed: {0}")]
    Transport(String),

    /// Every attempt failed
    #[error("fetch exhausted after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: String },
}

/// Errors reported by the message stream transport
#[derive(Debug, Error)]
pub enum StreamError {
    /// The stream or subject has no such entry
    #[error("not found: {0}")]
    NotFound(String),

    #[error("transport error: {0}")]
    Transport(String),
}

impl StreamError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StreamError::NotFound(_))
    }
}

/// Failure of a producer run. Aborts the remaining batch.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("stream setup failed: {0}")]
    Provision(#[source] StreamError),

    #[error("failed to fetch weather for {subject}: {source}")]
    Fetch {
        subject: String,
        #[source]
        source: FetchError,
    },

    #[error("failed to encode forecast for {subject}: {source}")]
    Encode {
        subject: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to publish to {subject}: {source}")]
    Publish {
        subject: String,
        #[source]
        source: StreamError,
    },
}

/// Why a single city could not be read. Each kind resolves to a fallback record.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("stream transport unavailable")]
    Unavailable,

    #[error("no forecast published on {0}")]
    NotFound(String),

    #[error("malformed forecast payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("stream error: {0}")]
    Transport(String),
}

impl From<StreamError> for ReadError {
    fn from(e: StreamError) -> Self {
        match e {
            StreamError::NotFound(subject) => ReadError::NotFound(subject),
            StreamError::Transport(msg) => ReadError::Transport(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_error_maps_to_read_error_kind() {
        let not_found: ReadError = StreamError::NotFound("weather.moscow".to_string()).into();
        assert!(matches!(not_found, ReadError::NotFound(ref s) if s == "weather.moscow"));

        let other: ReadError = StreamError::Transport("connection reset".to_string()).into();
        assert!(matches!(other, ReadError::Transport(_)));
    }

    #[test]
    fn test_exhausted_message_carries_attempts() {
        let err = FetchError::Exhausted {
            attempts: 3,
            last: "timed out".to_string(),
        };
        assert_eq!(err.to_string(), "fetch exhausted after 3 attempts: timed out");
    }
}
