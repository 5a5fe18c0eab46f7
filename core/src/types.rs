//! Recipient DTOs and the request bodies of the four endpoints.
//!
//! # Design
//! Field names follow the API's PascalCase wire format via serde renames.
//! Every recipient field is always sent; unset ones go out as `null`, and
//! `UpdateWithNullifNotPassed: false` keeps the server from clearing them.
//! Only `ID` is omitted when absent.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A recipient's identifier as the API reports it.
///
/// Untagged, so an ID read as a number is sent back as a number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipientId {
    Number(i64),
    Text(String),
}

impl RecipientId {
    /// Accept integers and non-empty strings; anything else is not an ID.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(RecipientId::Number),
            Value::String(s) if !s.is_empty() => Some(RecipientId::Text(s.clone())),
            _ => None,
        }
    }
}

impl From<i64> for RecipientId {
    fn from(id: i64) -> Self {
        RecipientId::Number(id)
    }
}

impl From<&str> for RecipientId {
    fn from(id: &str) -> Self {
        RecipientId::Text(id.to_string())
    }
}

impl From<String> for RecipientId {
    fn from(id: String) -> Self {
        RecipientId::Text(id)
    }
}

impl fmt::Display for RecipientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecipientId::Number(n) => write!(f, "{n}"),
            RecipientId::Text(s) => f.write_str(s),
        }
    }
}

/// A recipient record as returned by `SearchRecipient`. Only `ID` is
/// interpreted; every other field is kept as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipient(Map<String, Value>);

impl Recipient {
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn id(&self) -> Option<RecipientId> {
        self.0.get("ID").and_then(RecipientId::from_value)
    }

    pub fn email(&self) -> Option<&str> {
        self.0.get("Email").and_then(Value::as_str)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }
}

/// The recipient fields sent to `UpsertRecipient`.
///
/// `id` is not caller-settable: it is filled in only when a lookup by email
/// finds an existing record, which is what switches the upsert to `update`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecipientDetails {
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub zip: Option<String>,
    pub company: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    #[serde(rename = "ID", skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<RecipientId>,
}

impl RecipientDetails {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = Some(value.into());
        self
    }

    pub fn last_name(mut self, value: impl Into<String>) -> Self {
        self.last_name = Some(value.into());
        self
    }

    pub fn zip(mut self, value: impl Into<String>) -> Self {
        self.zip = Some(value.into());
        self
    }

    pub fn company(mut self, value: impl Into<String>) -> Self {
        self.company = Some(value.into());
        self
    }

    pub fn address(mut self, value: impl Into<String>) -> Self {
        self.address = Some(value.into());
        self
    }

    pub fn city(mut self, value: impl Into<String>) -> Self {
        self.city = Some(value.into());
        self
    }

    pub fn state(mut self, value: impl Into<String>) -> Self {
        self.state = Some(value.into());
        self
    }

    pub fn phone(mut self, value: impl Into<String>) -> Self {
        self.phone = Some(value.into());
        self
    }

    /// The existing record's ID, once a lookup has found one.
    pub fn id(&self) -> Option<&RecipientId> {
        self.id.as_ref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpsertType {
    Add,
    Update,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct AuthenticateRequest<'a> {
    pub password: &'a str,
    pub user_name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct SearchRecipientRequest<'a> {
    pub email: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct EditRecipientGroupsRequest<'a> {
    #[serde(rename = "ID")]
    pub id: &'a RecipientId,
    pub new_groups: Vec<i64>,
    pub unsubscribe_groups: Vec<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct UpsertRecipientRequest<'a> {
    pub recipient_details: &'a RecipientDetails,
    pub update_with_nullif_not_passed: bool,
    pub upsert_type: UpsertType,
    pub validate_email: bool,
}
