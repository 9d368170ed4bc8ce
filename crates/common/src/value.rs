//! Values returned by lookups.
//!
//! Decrypted variables are always strings, but S3 documents may hold any JSON
//! value, so results are modelled as a tagged union rather than raw text.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// A single JSON value from a lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Array(Vec<ConfigValue>),
    Object(BTreeMap<String, ConfigValue>),
}

impl ConfigValue {
    /// Borrow the value as a string slice if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_owned())
    }
}

/// A parsed S3 document: a JSON object mapping variable names to values.
pub type Document = HashMap<String, ConfigValue>;
