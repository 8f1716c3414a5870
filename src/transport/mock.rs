// src/transport/mock.rs

use std::collections::VecDeque;
use std::sync::Mutex;
use crate::error::{RandomOrgError, Result};
use crate::transport::Transport;

type Handler = Box<dyn Fn(&str, &[(&str, String)]) -> Result<String> + Send>;

/// A request seen by [`MockTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }
}

/// In-memory transport that replays queued responses, falling back to a
/// handler once the queue is empty. Every request is recorded.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<String>>>,
    handler: Option<Handler>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_handler<F>(handler: F) -> Self
    where
        F: Fn(&str, &[(&str, String)]) -> Result<String> + Send + 'static,
    {
        MockTransport {
            handler: Some(Box::new(handler)),
            ..Self::default()
        }
    }

    pub fn push_body(&self, body: impl Into<String>) -> &Self {
        self.lock_responses().push_back(Ok(body.into()));
        self
    }

    pub fn push_status(&self, status: u16, body: impl Into<String>) -> &Self {
        self.lock_responses().push_back(Err(RandomOrgError::Status {
            status,
            body: body.into(),
        }));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        match self.requests.lock() {
            Ok(requests) => requests.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn lock_responses(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<String>>> {
        self.responses.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Transport for MockTransport {
    fn get(&self, path: &str, query: &[(&str, String)]) -> Result<String> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(RecordedRequest {
                path: path.to_string(),
                query: query.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
            });

        if let Some(response) = self.lock_responses().pop_front() {
            return response;
        }

        match &self.handler {
            Some(handler) => handler(path, query),
            None => Err(RandomOrgError::Status {
                status: 404,
                body: format!("Error: no mock response for {}", path),
            }),
        }
    }
}
