//! Authentication state for a single client.
//!
//! # Design
//! The enabled flag and the token triple change together through two
//! transitions only: [`Session::establish`] after a successful `Authenticate`
//! and [`Session::disable`] after any failure. Disabled is absorbing.

use serde_json::{Map, Value};

use crate::response::is_truthy;

/// Where a client is in its authentication lifecycle.
///
/// `Authenticating` is not represented: it only exists while
/// `MagnetClient::authenticate` holds `&mut self`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Enabled,
    Disabled,
}

/// The values returned by a successful `Authenticate` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTokens {
    pub login_id: i64,
    pub session_id: Option<String>,
    pub user_id: Option<String>,
}

impl SessionTokens {
    /// Read the `LoginID` / `SessionID` / `UserID` triple.
    ///
    /// Rejected credentials come back as a 200 with every member empty or
    /// zero, so that case yields `None` rather than an empty session.
    pub fn from_authenticate_response(body: &Map<String, Value>) -> Option<Self> {
        let login = body.get("LoginID").unwrap_or(&Value::Null);
        let session = body.get("SessionID").unwrap_or(&Value::Null);
        let user = body.get("UserID").unwrap_or(&Value::Null);

        if !(is_truthy(login) || is_truthy(session) || is_truthy(user)) {
            return None;
        }

        Some(Self {
            login_id: as_login_id(login),
            session_id: as_token(session),
            user_id: as_token(user),
        })
    }
}

fn as_login_id(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n.as_i64().unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn as_token(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    enabled: bool,
    tokens: Option<SessionTokens>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            enabled: true,
            tokens: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn state(&self) -> SessionState {
        match (self.enabled, &self.tokens) {
            (false, _) => SessionState::Disabled,
            (true, None) => SessionState::Unauthenticated,
            (true, Some(_)) => SessionState::Enabled,
        }
    }

    pub fn tokens(&self) -> Option<&SessionTokens> {
        self.tokens.as_ref()
    }

    /// The `(SessionID, UserID)` pair to inject, if the client is enabled and
    /// both halves are present.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        if !self.enabled {
            return None;
        }
        let tokens = self.tokens.as_ref()?;
        Some((tokens.session_id.as_deref()?, tokens.user_id.as_deref()?))
    }

    /// Store a freshly issued token triple. Ignored once disabled.
    pub(crate) fn establish(&mut self, tokens: SessionTokens) {
        if self.enabled {
            self.tokens = Some(tokens);
        }
    }

    pub(crate) fn disable(&mut self) {
        self.enabled = false;
        self.tokens = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn all_empty_triple_is_rejected() {
        let body = object(json!({"LoginID": 0, "SessionID": null, "UserID": null}));
        assert_eq!(SessionTokens::from_authenticate_response(&body), None);

        let body = object(json!({"LoginID": "0", "SessionID": "", "UserID": ""}));
        assert_eq!(SessionTokens::from_authenticate_response(&body), None);

        assert_eq!(SessionTokens::from_authenticate_response(&Map::new()), None);
    }

    #[test]
    fn any_truthy_member_is_accepted() {
        let body = object(json!({"LoginID": 42, "SessionID": "abc", "UserID": 7}));
        let tokens = SessionTokens::from_authenticate_response(&body).unwrap();
        assert_eq!(tokens.login_id, 42);
        assert_eq!(tokens.session_id.as_deref(), Some("abc"));
        assert_eq!(tokens.user_id.as_deref(), Some("7"));

        let body = object(json!({"LoginID": 0, "SessionID": "only-session", "UserID": null}));
        let tokens = SessionTokens::from_authenticate_response(&body).unwrap();
        assert_eq!(tokens.login_id, 0);
        assert_eq!(tokens.user_id, None);
    }

    #[test]
    fn new_session_is_unauthenticated() {
        let session = Session::new();
        assert!(session.is_enabled());
        assert_eq!(session.state(), SessionState::Unauthenticated);
        assert_eq!(session.credentials(), None);
    }

    #[test]
    fn establish_exposes_credentials() {
        let mut session = Session::new();
        session.establish(SessionTokens {
            login_id: 1,
            session_id: Some("s".to_string()),
            user_id: Some("u".to_string()),
        });
        assert_eq!(session.state(), SessionState::Enabled);
        assert_eq!(session.credentials(), Some(("s", "u")));
    }

    #[test]
    fn credentials_need_both_halves() {
        let mut session = Session::new();
        session.establish(SessionTokens {
            login_id: 1,
            session_id: Some("s".to_string()),
            user_id: None,
        });
        assert_eq!(session.state(), SessionState::Enabled);
        assert_eq!(session.credentials(), None);
    }

    #[test]
    fn disable_is_absorbing() {
        let mut session = Session::new();
        session.disable();
        session.establish(SessionTokens {
            login_id: 1,
            session_id: Some("s".to_string()),
            user_id: Some("u".to_string()),
        });
        assert_eq!(session.state(), SessionState::Disabled);
        assert!(session.tokens().is_none());
        assert_eq!(session.credentials(), None);
    }
}
