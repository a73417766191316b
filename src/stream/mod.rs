//! Durable message stream
//!
//! Forecasts travel on one JetStream stream, one subject per city. The
//! publisher and the reader only see the `StreamTransport` trait.

mod nats;
mod provision;

#[cfg(test)]
pub(crate) mod memory;

pub use nats::JetStreamTransport;
pub use provision::ensure_stream;

use crate::error::StreamError;
use async_trait::async_trait;
use std::sync::Arc;

/// Name of the stream holding all forecasts
pub const STREAM_NAME: &str = "WEATHER_STREAM";

/// Subject pattern the stream is bound to
pub const SUBJECT_PATTERN: &str = "weather.*";

/// Subject carrying the forecast for `city_key`
pub fn subject_for(city_key: &str) -> String {
    format!("weather.{}", city_key)
}

/// The subset of a durable, subject-addressed stream the relay needs
#[async_trait]
pub trait StreamTransport: Send + Sync {
    /// Look up a stream; `StreamError::NotFound` if it does not exist
    async fn lookup_stream(&self, name: &str) -> Result<(), StreamError>;

    /// Create a stream bound to `subjects`
    async fn create_stream(&self, name: &str, subjects: &[&str]) -> Result<(), StreamError>;

    /// Publish and wait for the stream to acknowledge
    async fn publish(&self, subject: &str, payload: Vec<u8>) -> Result<(), StreamError>;

    /// Payload of the most recent message on `subject`; `StreamError::NotFound` if none
    async fn last_message(&self, stream: &str, subject: &str) -> Result<Vec<u8>, StreamError>;

    /// Whether the underlying connection is currently usable
    fn is_connected(&self) -> bool;

    /// Flush outstanding work and release the connection
    async fn close(&self) -> Result<(), StreamError>;
}

#[async_trait]
impl<T: StreamTransport + ?Sized> StreamTransport for Arc<T> {
    async fn lookup_stream(&self, name: &str) -> Result<(), StreamError> {
        (**self).lookup_stream(name).await
    }

    async fn create_stream(&self, name: &str, subjects: &[&str]) -> Result<(), StreamError> {
        (**self).create_stream(name, subjects).await
    }

    async fn publish(&self, subject: &str, payload: Vec<u8>) -> Result<(), StreamError> {
        (**self).publish(subject, payload).await
    }

    async fn last_message(&self, stream: &str, subject: &str) -> Result<Vec<u8>, StreamError> {
        (**self).last_message(stream, subject).await
    }

    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }

    async fn close(&self) -> Result<(), StreamError> {
        (**self).close().await
    }
}
