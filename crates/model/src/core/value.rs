use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A single SQL scalar as read from or written to the database.
///
/// Values are opaque to the copy itself: they are carried from the source to
/// the destination, optionally substituted by a translation rule on the way.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Value {
    Int(i64),
    Uint(u64),
    Float(f64),
    String(String),
    Boolean(bool),
    Bytes(Vec<u8>),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    Null,
}

impl Value {
    /// Builds a value from a JSON scalar, used when loading translation rules.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(v) => Value::Boolean(*v),
            serde_json::Value::Number(n) => {
                if let Some(v) = n.as_i64() {
                    Value::Int(v)
                } else if let Some(v) = n.as_u64() {
                    Value::Uint(v)
                } else {
                    Value::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(v) => Value::String(v.clone()),
            other => Value::String(other.to_string()),
        }
    }

    /// Equality as used by translation-rule matching.
    ///
    /// The binary protocol picks `Int` vs `Uint` by column signedness, not by
    /// value, so numeric variants compare by magnitude rather than by
    /// discriminant.
    pub fn matches(&self, other: &Value) -> bool {
        use Value::*;
        match (self, other) {
            (Int(a), Uint(b)) | (Uint(b), Int(a)) => *a >= 0 && *a as u64 == *b,
            (Int(a), Float(b)) | (Float(b), Int(a)) => *a as f64 == *b,
            (Uint(a), Float(b)) | (Float(b), Uint(a)) => *a as f64 == *b,
            (a, b) => a == b,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}
