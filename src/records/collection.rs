//! Collection names and record keys.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Records of one collection, ordered by key.
pub type Records = BTreeMap<RecordKey, Value>;

/// The named record collections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Collection {
    Events,
    Questions,
    Documents,
    Mastery,
    Notes,
    Settings,
}

/// Where a collection finds the key of a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyPath {
    /// Key is read from this field of the record.
    Inline(&'static str),
    /// Key is supplied by the caller on every write.
    OutOfLine,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::Events,
        Collection::Questions,
        Collection::Documents,
        Collection::Mastery,
        Collection::Notes,
        Collection::Settings,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Collection::Events => "events",
            Collection::Questions => "questions",
            Collection::Documents => "documents",
            Collection::Mastery => "mastery",
            Collection::Notes => "notes",
            Collection::Settings => "settings",
        }
    }

    pub fn key_path(self) -> KeyPath {
        match self {
            Collection::Settings => KeyPath::OutOfLine,
            _ => KeyPath::Inline("id"),
        }
    }

    /// Extract the key of a record for an inline-keyed collection.
    pub fn key_of(self, record: &Value) -> Option<RecordKey> {
        match self.key_path() {
            KeyPath::Inline(field) => record.get(field).and_then(RecordKey::from_value),
            KeyPath::OutOfLine => None,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Key of a record within its collection.
///
/// Integers sort before text, and numerically among themselves.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RecordKey {
    Int(i64),
    Text(String),
}

impl RecordKey {
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(RecordKey::Text(s.clone())),
            Value::Number(n) => n.as_i64().map(RecordKey::Int),
            _ => None,
        }
    }
}

impl From<&str> for RecordKey {
    fn from(s: &str) -> Self {
        RecordKey::Text(s.to_string())
    }
}

impl From<String> for RecordKey {
    fn from(s: String) -> Self {
        RecordKey::Text(s)
    }
}

impl From<u32> for RecordKey {
    fn from(n: u32) -> Self {
        RecordKey::Int(i64::from(n))
    }
}

impl From<i64> for RecordKey {
    fn from(n: i64) -> Self {
        RecordKey::Int(n)
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKey::Int(n) => write!(f, "{}", n),
            RecordKey::Text(s) => f.write_str(s),
        }
    }
}
