//! Shared test transport.

use std::cell::RefCell;
use std::collections::VecDeque;

use magnet_core::{HttpRequest, HttpResponse, Transport, TransportError};
use serde_json::Value;

/// Replays queued responses in order and records every request it receives.
///
/// Running out of queued responses is a transport failure, so an unexpected
/// extra call shows up as a failed operation rather than a panic.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

#[allow(dead_code)]
impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: impl Into<String>) -> &Self {
        self.responses.borrow_mut().push_back(Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.into(),
        }));
        self
    }

    pub fn respond_json(&self, body: Value) -> &Self {
        self.respond(200, body.to_string())
    }

    pub fn fail(&self, message: &str) -> &Self {
        self.responses.borrow_mut().push_back(Err(TransportError::new(message)));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    /// Endpoint name (last URL segment) and parsed body of request `index`.
    pub fn sent(&self, index: usize) -> (String, Value) {
        let requests = self.requests.borrow();
        let req = &requests[index];
        let endpoint = req.url.rsplit('/').next().unwrap_or_default().to_string();
        (endpoint, serde_json::from_str(&req.body).unwrap())
    }

    pub fn last_sent(&self) -> (String, Value) {
        self.sent(self.request_count() - 1)
    }
}

impl Transport for ScriptedTransport {
    fn post(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(request.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::new("no scripted response left")))
    }
}
