//! Session lifecycle and the call envelope.
//!
//! # Design
//! [`MagnetClient::call`] is the only path to the network. It refuses to
//! send anything once the session is disabled, injects the session token
//! pair into every payload after authentication, and turns every failure
//! into a logged [`ApiResponse::Null`].

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, error, info, warn};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, Transport};
use crate::response::ApiResponse;
use crate::session::{Session, SessionState, SessionTokens};
use crate::types::AuthenticateRequest;

/// The endpoints this client speaks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Authenticate,
    SearchRecipient,
    EditRecipientGroups,
    UpsertRecipient,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Authenticate => "Authenticate",
            Endpoint::SearchRecipient => "SearchRecipient",
            Endpoint::EditRecipientGroups => "EditRecipientGroups",
            Endpoint::UpsertRecipient => "UpsertRecipient",
        }
    }
}

/// Authenticated client for the MagnetMail REST adapter.
///
/// Intended for a single owner: authentication needs `&mut self`, every
/// other operation borrows shared. Share it across threads only behind
/// external synchronization.
pub struct MagnetClient<T> {
    transport: T,
    base_url: String,
    session: Session,
}

impl<T: Transport> MagnetClient<T> {
    /// Build a client and authenticate with the configured credentials.
    ///
    /// Never fails. If authentication does not succeed the client comes back
    /// disabled and every operation returns its negative result.
    pub fn new(transport: T, config: &ClientConfig) -> Self {
        let mut client = Self::unauthenticated(transport, &config.base_url);
        client.authenticate(&config.username, &config.password);
        client
    }

    pub fn unauthenticated(transport: T, base_url: &str) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
            session: Session::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_enabled(&self) -> bool {
        self.session.is_enabled()
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn session_tokens(&self) -> Option<&SessionTokens> {
        self.session.tokens()
    }

    /// Exchange credentials for a session token pair.
    ///
    /// Any failure (transport error, non-200, or the all-empty triple the API
    /// returns for bad credentials) disables the client for good. A disabled
    /// client does not try again.
    pub fn authenticate(&mut self, username: &str, password: &str) {
        if !self.session.is_enabled() {
            debug!("authentication_skipped_client_disabled");
            return;
        }

        let request = AuthenticateRequest {
            password,
            user_name: username,
        };
        let outcome = to_payload(&request).and_then(|payload| self.try_call(Endpoint::Authenticate, payload));

        match outcome {
            Ok(response) => match response.as_object().and_then(SessionTokens::from_authenticate_response) {
                Some(tokens) => {
                    info!(login_id = tokens.login_id, "authentication_succeeded");
                    self.session.establish(tokens);
                }
                None => {
                    warn!(username, "authentication_rejected");
                    self.session.disable();
                }
            },
            Err(e) => {
                error!(username, error = %e, "authentication_failed");
                self.session.disable();
            }
        }
    }

    /// POST `payload` to `endpoint` and return the parsed JSON body.
    ///
    /// Returns `Null` without touching the network when the client is
    /// disabled, and `Null` (logged) for any non-200 status, transport error
    /// or malformed body.
    pub fn call(&self, endpoint: Endpoint, payload: Map<String, Value>) -> ApiResponse {
        if !self.session.is_enabled() {
            return ApiResponse::Null;
        }
        match self.try_call(endpoint, payload) {
            Ok(response) => response,
            Err(e) => {
                error!(endpoint = endpoint.as_str(), error = %e, "api_call_failed");
                ApiResponse::Null
            }
        }
    }

    /// Serialize a request DTO and send it through [`Self::call`].
    pub(crate) fn call_with<S: Serialize>(&self, endpoint: Endpoint, request: &S) -> ApiResponse {
        match to_payload(request) {
            Ok(payload) => self.call(endpoint, payload),
            Err(e) => {
                error!(endpoint = endpoint.as_str(), error = %e, "api_call_failed");
                ApiResponse::Null
            }
        }
    }

    fn try_call(&self, endpoint: Endpoint, mut payload: Map<String, Value>) -> Result<ApiResponse, ApiError> {
        if let Some((session_id, user_id)) = self.session.credentials() {
            payload
                .entry("SessionID")
                .or_insert_with(|| Value::String(session_id.to_string()));
            payload
                .entry("UserID")
                .or_insert_with(|| Value::String(user_id.to_string()));
        }

        let body =
            serde_json::to_string(&Value::Object(payload)).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        let request = HttpRequest::json_post(self.endpoint_url(endpoint), body);
        let response = self.transport.post(&request)?;

        if response.status != 200 {
            return Err(ApiError::HttpError {
                status: response.status,
                body: response.body,
            });
        }

        let value: Value =
            serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))?;
        Ok(ApiResponse::from(value))
    }

    fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.as_str())
    }
}

/// Turn a request DTO into the JSON object the envelope extends.
fn to_payload<S: Serialize>(request: &S) -> Result<Map<String, Value>, ApiError> {
    match serde_json::to_value(request) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ApiError::SerializationError(format!(
            "expected a JSON object payload, got {other}"
        ))),
        Err(e) => Err(ApiError::SerializationError(e.to_string())),
    }
}
