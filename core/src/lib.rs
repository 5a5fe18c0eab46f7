//! Blocking client core for the MagnetMail `ApiAdapter/Rest` API.
//!
//! # Overview
//! Authenticates once, keeps the resulting session token pair, and exposes
//! three recipient operations that all go through a single call envelope.
//! The network round-trip is delegated to a [`Transport`], so tests can
//! substitute a recording transport for the bundled [`UreqTransport`].
//!
//! # Design
//! - Nothing escapes a domain operation as an error. Authentication failure
//!   disables the client permanently; call failures are logged and surface as
//!   `None` / `false`.
//! - Session state lives in [`Session`] and changes only through its
//!   `establish` / `disable` transitions.
//! - Responses are narrowed from [`ApiResponse`] per operation; an unexpected
//!   shape counts as a failed call.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod recipients;
pub mod response;
pub mod session;
pub mod transport;
pub mod types;

pub use client::{Endpoint, MagnetClient};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{ApiError, ConfigError, TransportError};
pub use http::{HttpRequest, HttpResponse, Transport};
pub use response::ApiResponse;
pub use session::{Session, SessionState, SessionTokens};
pub use transport::UreqTransport;
pub use types::{Recipient, RecipientDetails, RecipientId, UpsertType};
