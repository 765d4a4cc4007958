//! Canned-response transport for resolver unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use crate::transport::{HttpTransport, TransportError};

/// Serves fixed bodies by exact URL and records every request.
///
/// Unknown URLs answer with HTTP 404.
#[derive(Default)]
pub struct StubTransport {
    responses: HashMap<String, Bytes>,
    calls: Mutex<Vec<String>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, url: &str, body: &str) -> Self {
        self.responses
            .insert(url.to_string(), Bytes::copy_from_slice(body.as_bytes()));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for StubTransport {
    async fn fetch(&self, url: &str) -> Result<Bytes, TransportError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| TransportError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}
