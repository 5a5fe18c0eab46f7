//! HTTP transport types and the transport seam.
//!
//! # Design
//! Requests and responses are plain owned data. The client builds an
//! [`HttpRequest`] and hands it to a [`Transport`]; whatever executes the
//! round-trip (the bundled `ureq` adapter, or a recording fake in tests)
//! returns an [`HttpResponse`]. Non-2xx statuses are data, not errors: only a
//! failure to complete the exchange is a [`TransportError`].
//!
//! Every call the API accepts is a JSON POST, so there is no method field.

use crate::error::TransportError;

/// A JSON POST described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpRequest {
    /// Build a POST carrying `body` as JSON.
    pub fn json_post(url: String, body: String) -> Self {
        Self {
            url,
            headers: vec![
                ("content-type".to_string(), "application/json".to_string()),
                ("accept".to_string(), "application/json".to_string()),
            ],
            body,
        }
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Executes a JSON POST and reports the status code and body.
pub trait Transport {
    fn post(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).post(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn post(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).post(request)
    }
}
