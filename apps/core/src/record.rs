//! Structured organization record (teams, rosters, staff, titles, stats).
//!
//! Loaded once at startup from JSON and never mutated. The schema is loose:
//! every key is optional, and object key order from the file is preserved.

use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::error::AppError;

#[derive(Debug, Clone, Default)]
pub struct OrgRecord {
    root: Map<String, Value>,
}

impl OrgRecord {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses a record from JSON text. The top level must be an object.
    pub fn parse(json: &str) -> Result<Self, AppError> {
        match serde_json::from_str::<Value>(json)? {
            Value::Object(root) => Ok(Self { root }),
            other => Err(AppError::Validation(format!(
                "Organization record must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Loads the record, degrading to an empty one on any failure.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(record) => {
                info!(path = %path.display(), sections = record.root.len(), "Organization record loaded");
                record
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Organization record unavailable, using empty record");
                Self::empty()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    /// Top-level sections in file order.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.root.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl From<Map<String, Value>> for OrgRecord {
    fn from(root: Map<String, Value>) -> Self {
        Self { root }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
