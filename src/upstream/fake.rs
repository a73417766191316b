//! Scripted `HttpGet` for tests

use super::http::{HttpGet, HttpResponse};
use crate::error::FetchError;
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

/// Fails the first `failures` calls with a transport error, then returns `response`
pub struct FakeHttp {
    failures: Mutex<u32>,
    response: HttpResponse,
    calls: Mutex<Vec<(String, Duration)>>,
}

impl FakeHttp {
    pub fn ok(response: HttpResponse) -> Self {
        Self::failing(0, response)
    }

    pub fn failing(failures: u32, response: HttpResponse) -> Self {
        Self {
            failures: Mutex::new(failures),
            response,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn urls(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(u, _)| u.clone()).collect()
    }

    pub fn last_timeout(&self) -> Option<Duration> {
        self.calls.lock().unwrap().last().map(|(_, t)| *t)
    }
}

#[async_trait]
impl HttpGet for FakeHttp {
    async fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, FetchError> {
        self.calls.lock().unwrap().push((url.to_string(), timeout));

        let mut failures = self.failures.lock().unwrap();
        if *failures > 0 {
            *failures -= 1;
            return Err(FetchError::Transport("connection refused".to_string()));
        }
        Ok(self.response.clone())
    }
}
