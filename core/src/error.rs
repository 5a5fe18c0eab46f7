//! Error types for the MagnetMail client.
//!
//! # Design
//! These errors are internal to the call envelope: they are logged and then
//! collapsed into a `Null` response, so no domain operation ever returns one.
//! [`ConfigError`] is the exception, since configuration is read before a
//! client exists.

use thiserror::Error;

/// The transport could not complete the round-trip (connection refused,
/// timeout, unreadable body).
#[derive(Debug, Error)]
#[error("transport failure: {0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Why a single API call produced no usable response.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered with something other than 200.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// A 200 response whose body is not valid JSON.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be turned into a JSON object.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

/// Missing or unusable client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("environment variable {0} is empty")]
    EmptyVar(&'static str),
}
