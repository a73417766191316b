//! In-memory `StreamTransport` for tests

use super::StreamTransport;
use crate::error::StreamError;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryStream {
    disconnected: bool,
    unreachable: bool,
    failing_publish: HashSet<String>,
    failing_reads: HashSet<String>,
    streams: Mutex<HashMap<String, Vec<String>>>,
    messages: Mutex<HashMap<String, Vec<Vec<u8>>>>,
    create_calls: AtomicUsize,
    read_calls: AtomicUsize,
    closes: AtomicUsize,
}

impl MemoryStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports itself as not connected
    pub fn disconnected(mut self) -> Self {
        self.disconnected = true;
        self
    }

    /// Stream lookups fail with a transport error
    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    pub fn fail_publish_on(mut self, subject: &str) -> Self {
        self.failing_publish.insert(subject.to_string());
        self
    }

    pub fn fail_reads_on(mut self, subject: &str) -> Self {
        self.failing_reads.insert(subject.to_string());
        self
    }

    pub fn with_message(self, subject: &str, payload: impl Into<Vec<u8>>) -> Self {
        self.messages
            .lock()
            .unwrap()
            .entry(subject.to_string())
            .or_default()
            .push(payload.into());
        self
    }

    pub fn published(&self, subject: &str) -> Vec<Vec<u8>> {
        self.messages.lock().unwrap().get(subject).cloned().unwrap_or_default()
    }

    pub fn subjects(&self) -> Vec<String> {
        let mut subjects: Vec<String> = self.messages.lock().unwrap().keys().cloned().collect();
        subjects.sort();
        subjects
    }

    pub fn stream_subjects(&self, name: &str) -> Option<Vec<String>> {
        self.streams.lock().unwrap().get(name).cloned()
    }

    pub fn stream_count(&self) -> usize {
        self.streams.lock().unwrap().len()
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn read_calls(&self) -> usize {
        self.read_calls.load(Ordering::SeqCst)
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StreamTransport for MemoryStream {
    async fn lookup_stream(&self, name: &str) -> Result<(), StreamError> {
        if self.unreachable {
            return Err(StreamError::Transport("no servers available".to_string()));
        }
        if self.streams.lock().unwrap().contains_key(name) {
            Ok(())
        } else {
            Err(StreamError::NotFound(name.to_string()))
        }
    }

    async fn create_stream(&self, name: &str, subjects: &[&str]) -> Result<(), StreamError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let mut streams = self.streams.lock().unwrap();
        if streams.contains_key(name) {
            return Err(StreamError::Transport(format!("stream name already in use: {}", name)));
        }
        streams.insert(name.to_string(), subjects.iter().map(|s| s.to_string()).collect());
        Ok(())
    }

    async fn publish(&self, subject: &str, payload: Vec<u8>) -> Result<(), StreamError> {
        if self.failing_publish.contains(subject) {
            return Err(StreamError::Transport(format!("no responders for {}", subject)));
        }
        self.messages
            .lock()
            .unwrap()
            .entry(subject.to_string())
            .or_default()
            .push(payload);
        Ok(())
    }

    async fn last_message(&self, _stream: &str, subject: &str) -> Result<Vec<u8>, StreamError> {
        self.read_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_reads.contains(subject) {
            return Err(StreamError::Transport("timed out".to_string()));
        }
        self.messages
            .lock()
            .unwrap()
            .get(subject)
            .and_then(|m| m.last().cloned())
            .ok_or_else(|| StreamError::NotFound(subject.to_string()))
    }

    fn is_connected(&self) -> bool {
        !self.disconnected
    }

    async fn close(&self) -> Result<(), StreamError> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
