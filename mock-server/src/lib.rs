//! In-memory imitation of the MagnetMail `ApiAdapter/Rest` endpoints.
//!
//! Behaves like the real service where clients depend on it: rejected
//! credentials still get a 200 with an all-empty session triple, and a group
//! edit against an unknown recipient reports a non-1 `Status`.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const API_PREFIX: &str = "/ApiAdapter/Rest";

/// `Status` reported when a group edit targets an unknown recipient.
pub const STATUS_UNKNOWN_RECIPIENT: i64 = 50;

#[derive(Clone, Debug)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug)]
pub struct Store {
    credentials: Credentials,
    /// SessionID -> UserID
    sessions: HashMap<String, String>,
    next_login_id: i64,
    recipients: BTreeMap<i64, Map<String, Value>>,
    next_recipient_id: i64,
    groups: HashMap<i64, BTreeSet<i64>>,
}

impl Store {
    fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            sessions: HashMap::new(),
            next_login_id: 1,
            recipients: BTreeMap::new(),
            next_recipient_id: 1000,
            groups: HashMap::new(),
        }
    }

    fn check_session(&self, session: &SessionFields) -> Result<(), ApiFailure> {
        match (&session.session_id, &session.user_id) {
            (Some(sid), Some(uid)) if self.sessions.get(sid) == Some(uid) => Ok(()),
            _ => Err(fail(StatusCode::UNAUTHORIZED, "invalid or missing session")),
        }
    }
}

pub type Db = Arc<RwLock<Store>>;

type ApiFailure = (StatusCode, Json<Value>);
type ApiResult = Result<Json<Value>, ApiFailure>;

fn fail(status: StatusCode, message: &str) -> ApiFailure {
    (status, Json(json!({ "Message": message })))
}

#[derive(Debug, Default, Deserialize)]
pub struct SessionFields {
    #[serde(rename = "SessionID")]
    pub session_id: Option<String>,
    #[serde(rename = "UserID")]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuthenticateInput {
    pub user_name: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchRecipientInput {
    pub email: String,
    #[serde(flatten)]
    pub session: SessionFields,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EditRecipientGroupsInput {
    #[serde(rename = "ID")]
    pub id: Value,
    #[serde(default)]
    pub new_groups: Vec<i64>,
    #[serde(default)]
    pub unsubscribe_groups: Vec<i64>,
    #[serde(flatten)]
    pub session: SessionFields,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpsertRecipientInput {
    pub recipient_details: Map<String, Value>,
    #[serde(default)]
    pub update_with_nullif_not_passed: bool,
    pub upsert_type: String,
    #[serde(default)]
    pub validate_email: bool,
    #[serde(flatten)]
    pub session: SessionFields,
}

pub fn app(credentials: Credentials) -> Router {
    let db: Db = Arc::new(RwLock::new(Store::new(credentials)));
    let api = Router::new()
        .route("/Authenticate", post(authenticate))
        .route("/SearchRecipient", post(search_recipient))
        .route("/EditRecipientGroups", post(edit_recipient_groups))
        .route("/UpsertRecipient", post(upsert_recipient));
    Router::new().nest(API_PREFIX, api).with_state(db)
}

pub async fn run(listener: TcpListener, credentials: Credentials) -> Result<(), std::io::Error> {
    axum::serve(listener, app(credentials)).await
}

async fn authenticate(State(db): State<Db>, Json(input): Json<AuthenticateInput>) -> Json<Value> {
    let mut store = db.write().await;
    if input.user_name != store.credentials.username || input.password != store.credentials.password {
        tracing::info!(user = %input.user_name, "mock_authentication_rejected");
        return Json(json!({ "LoginID": 0, "SessionID": null, "UserID": null }));
    }

    let login_id = store.next_login_id;
    store.next_login_id += 1;
    let session_id = Uuid::new_v4().to_string();
    let user_id = login_id.to_string();
    store.sessions.insert(session_id.clone(), user_id.clone());
    Json(json!({ "LoginID": login_id, "SessionID": session_id, "UserID": user_id }))
}

async fn search_recipient(State(db): State<Db>, Json(input): Json<SearchRecipientInput>) -> ApiResult {
    let store = db.read().await;
    store.check_session(&input.session)?;

    let matches: Vec<Value> = store
        .recipients
        .values()
        .filter(|record| {
            record
                .get("Email")
                .and_then(Value::as_str)
                .is_some_and(|email| email.eq_ignore_ascii_case(&input.email))
        })
        .map(|record| Value::Object(record.clone()))
        .collect();
    Ok(Json(Value::Array(matches)))
}

async fn edit_recipient_groups(State(db): State<Db>, Json(input): Json<EditRecipientGroupsInput>) -> ApiResult {
    let mut store = db.write().await;
    store.check_session(&input.session)?;

    let Some(id) = id_from_value(&input.id).filter(|id| store.recipients.contains_key(id)) else {
        return Ok(Json(json!({ "Status": STATUS_UNKNOWN_RECIPIENT })));
    };
    let groups = store.groups.entry(id).or_default();
    groups.extend(input.new_groups.iter().copied());
    for group in &input.unsubscribe_groups {
        groups.remove(group);
    }
    Ok(Json(json!({ "Status": 1 })))
}

async fn upsert_recipient(State(db): State<Db>, Json(input): Json<UpsertRecipientInput>) -> ApiResult {
    let mut store = db.write().await;
    store.check_session(&input.session)?;

    let mut details = input.recipient_details;
    let supplied_id = details.remove("ID");

    match input.upsert_type.as_str() {
        "add" => {
            let email = details.get("Email").and_then(Value::as_str).unwrap_or_default();
            if email.is_empty() {
                return Err(fail(StatusCode::BAD_REQUEST, "Email is required"));
            }
            if input.validate_email && !email.contains('@') {
                return Err(fail(StatusCode::BAD_REQUEST, "Email is not valid"));
            }
            let id = store.next_recipient_id;
            store.next_recipient_id += 1;
            let mut record: Map<String, Value> = details.into_iter().filter(|(_, v)| !v.is_null()).collect();
            record.insert("ID".to_string(), json!(id));
            store.recipients.insert(id, record);
            Ok(Json(json!({ "ID": id })))
        }
        "update" => {
            let id = supplied_id
                .as_ref()
                .and_then(id_from_value)
                .ok_or_else(|| fail(StatusCode::BAD_REQUEST, "ID is required for update"))?;
            let record = store
                .recipients
                .get_mut(&id)
                .ok_or_else(|| fail(StatusCode::BAD_REQUEST, "unknown recipient ID"))?;

            if input.update_with_nullif_not_passed {
                for (key, value) in record.iter_mut() {
                    if key != "ID" && key != "Email" && !details.contains_key(key) {
                        *value = Value::Null;
                    }
                }
            }
            for (key, value) in details {
                if value.is_null() && !input.update_with_nullif_not_passed {
                    continue;
                }
                record.insert(key, value);
            }
            Ok(Json(json!({ "ID": id })))
        }
        other => Err(fail(StatusCode::BAD_REQUEST, &format!("unknown UpsertType {other}"))),
    }
}

fn id_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
