//! Dynamically shaped API responses.
//!
//! The remote API answers with an array for searches, an object for most
//! other calls, and sometimes nothing useful at all. [`ApiResponse`] keeps the
//! shape explicit so each operation has to narrow it, and a failed call is
//! simply `Null`.

use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// JSON `null`, or a call that failed in the envelope.
    Null,
    Object(Map<String, Value>),
    Array(Vec<Value>),
    /// A bare string, number or boolean.
    Scalar(Value),
}

impl ApiResponse {
    pub fn is_null(&self) -> bool {
        matches!(self, ApiResponse::Null)
    }

    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        match self {
            ApiResponse::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            ApiResponse::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Look up a top-level field; `None` unless this is an object holding it.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(name))
    }

    pub fn into_array(self) -> Option<Vec<Value>> {
        match self {
            ApiResponse::Array(items) => Some(items),
            _ => None,
        }
    }
}

impl From<Value> for ApiResponse {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => ApiResponse::Null,
            Value::Object(map) => ApiResponse::Object(map),
            Value::Array(items) => ApiResponse::Array(items),
            scalar => ApiResponse::Scalar(scalar),
        }
    }
}

/// Loose truthiness as the remote API's own clients apply it: `null`,
/// `false`, zero, `""`, `"0"` and `[]` are false, everything else is true.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

/// An integer read the way the API's loose `==` comparisons read it:
/// `1`, `1.0` and `"1"` are all 1. Fractions and non-numeric strings are not
/// integers.
pub fn loose_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| s.parse::<f64>().ok().and_then(integral))
        }
        _ => None,
    }
}

fn integral(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0).then_some(f as i64)
}
