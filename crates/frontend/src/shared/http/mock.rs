//! In-memory transport for unit tests

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;
use serde_json::Value;

use super::error::ApiError;
use super::payload::Payload;
use super::request::{ApiRequest, HttpMethod};
use super::transport::Transport;

/// Records every request and answers from a queue (empty queue → `Payload::Empty`)
#[derive(Default)]
pub struct MockTransport {
    replies: RefCell<VecDeque<Result<Payload, ApiError>>>,
    requests: RefCell<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply_json(&self, value: Value) -> &Self {
        self.replies.borrow_mut().push_back(Ok(Payload::Json(value)));
        self
    }

    pub fn reply_empty(&self) -> &Self {
        self.replies.borrow_mut().push_back(Ok(Payload::Empty));
        self
    }

    pub fn reply_status(&self, status: u16, body: Value) -> &Self {
        self.replies
            .borrow_mut()
            .push_back(Err(ApiError::http(status, "", Some(body), "mock")));
        self
    }

    pub fn fail_network(&self) -> &Self {
        self.replies
            .borrow_mut()
            .push_back(Err(ApiError::network("mock", "offline")));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    /// `(method, path)` of every recorded request
    pub fn calls(&self) -> Vec<(HttpMethod, String)> {
        self.requests
            .borrow()
            .iter()
            .map(|r| (r.method, r.path.clone()))
            .collect()
    }

    pub fn last_body(&self) -> Option<Value> {
        self.requests
            .borrow()
            .last()
            .and_then(|r| r.json_body().cloned())
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<Payload, ApiError> {
        self.requests.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or(Ok(Payload::Empty))
    }
}
