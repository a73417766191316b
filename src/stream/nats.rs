//! NATS JetStream transport

use super::StreamTransport;
use crate::error::StreamError;
use async_nats::connection::State;
use async_nats::jetstream::{self, context::GetStreamErrorKind, stream::LastRawMessageErrorKind, ErrorCode};
use async_trait::async_trait;

/// JetStream-backed `StreamTransport`
pub struct JetStreamTransport {
    client: async_nats::Client,
    jetstream: jetstream::Context,
}

impl JetStreamTransport {
    /// Connect to the NATS server at `url`
    pub async fn connect(url: &str) -> Result<Self, StreamError> {
        let client = async_nats::connect(url)
            .await
            .map_err(|e| StreamError::Transport(format!("failed to connect to {}: {}", url, e)))?;
        let jetstream = jetstream::new(client.clone());

        log::info!("connected to NATS at {}", url);
        Ok(Self { client, jetstream })
    }

    async fn get_stream(&self, name: &str) -> Result<jetstream::stream::Stream, StreamError> {
        self.jetstream.get_stream(name).await.map_err(|e| match e.kind() {
            GetStreamErrorKind::JetStream(js) if js.error_code() == ErrorCode::STREAM_NOT_FOUND => {
                StreamError::NotFound(name.to_string())
            }
            _ => StreamError::Transport(e.to_string()),
        })
    }
}

#[async_trait]
impl StreamTransport for JetStreamTransport {
    async fn lookup_stream(&self, name: &str) -> Result<(), StreamError> {
        self.get_stream(name).await.map(|_| ())
    }

    async fn create_stream(&self, name: &str, subjects: &[&str]) -> Result<(), StreamError> {
        self.jetstream
            .create_stream(jetstream::stream::Config {
                name: name.to_string(),
                subjects: subjects.iter().map(|s| s.to_string()).collect(),
                ..Default::default()
            })
            .await
            .map_err(|e| StreamError::Transport(e.to_string()))?;
        Ok(())
    }

    async fn publish(&self, subject: &str, payload: Vec<u8>) -> Result<(), StreamError> {
        let ack = self
            .jetstream
            .publish(subject.to_string(), payload.into())
            .await
            .map_err(|e| StreamError::Transport(e.to_string()))?;
        ack.await.map_err(|e| StreamError::Transport(e.to_string()))?;
        Ok(())
    }

    async fn last_message(&self, stream: &str, subject: &str) -> Result<Vec<u8>, StreamError> {
        let stream = self.get_stream(stream).await?;
        let message = stream
            .get_last_raw_message_by_subject(subject)
            .await
            .map_err(|e| match e.kind() {
                LastRawMessageErrorKind::NoMessageFound => StreamError::NotFound(subject.to_string()),
                _ => StreamError::Transport(e.to_string()),
            })?;
        Ok(message.payload.to_vec())
    }

    fn is_connected(&self) -> bool {
        matches!(self.client.connection_state(), State::Connected)
    }

    async fn close(&self) -> Result<(), StreamError> {
        // The socket itself closes once the last client handle is dropped
        self.client
            .flush()
            .await
            .map_err(|e| StreamError::Transport(e.to_string()))
    }
}
