//! Flat input record supplied by a record source.
//! A record is a mapping of field name to text; a missing field reads as "".

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{LinkscanError, Result};

/// Well-known field names seen across contract, patent and partnership datasets.
pub mod fields {
    pub const RECIPIENT_NAME: &str = "recipient_name";
    pub const VENDOR_NAME: &str = "vendor_name";
    pub const AWARD_DESCRIPTION: &str = "award_description";
    pub const ASSIGNEE_NAME: &str = "assignee_name";
    pub const NAME: &str = "name";
    pub const DESCRIPTION: &str = "description";
    pub const CITY: &str = "city";
    pub const STATE: &str = "state";
    pub const COUNTRY: &str = "country";

    /// Name-like fields, the usual exclusion scope.
    pub const NAME_FIELDS: &[&str] = &[RECIPIENT_NAME, VENDOR_NAME, ASSIGNEE_NAME, NAME];

    /// Name plus free-text fields, the usual scan scope.
    pub const DEFAULT_SCAN_FIELDS: &[&str] = &[
        RECIPIENT_NAME,
        VENDOR_NAME,
        ASSIGNEE_NAME,
        NAME,
        AWARD_DESCRIPTION,
        DESCRIPTION,
        CITY,
        COUNTRY,
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Value>", into = "BTreeMap<String, String>")]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Field text, or "" when the field is absent.
    pub fn get(&self, field: &str) -> &str {
        self.fields.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// True when every field is absent or blank.
    pub fn is_blank(&self) -> bool {
        self.fields.values().all(|v| v.trim().is_empty())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Lowercased, space-joined text of the selected fields.
    /// Absent and blank fields are skipped.
    pub fn search_text<S: AsRef<str>>(&self, selected: &[S]) -> String {
        let mut out = String::new();
        for name in selected {
            let value = self.get(name.as_ref()).trim();
            if value.is_empty() {
                continue;
            }
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&value.to_lowercase());
        }
        out
    }

    /// Build a record from an arbitrary JSON value. Only objects are records.
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(map.into_iter().collect::<BTreeMap<_, _>>().into()),
            other => Err(LinkscanError::Parse(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

/// Coerce a JSON scalar to text. `null` means absent.
fn coerce_value(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        nested @ (Value::Array(_) | Value::Object(_)) => Some(nested.to_string()),
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

impl From<BTreeMap<String, Value>> for Record {
    fn from(raw: BTreeMap<String, Value>) -> Self {
        let fields = raw
            .into_iter()
            .filter_map(|(k, v)| coerce_value(v).map(|v| (k, v)))
            .collect();
        Self { fields }
    }
}

impl From<BTreeMap<String, String>> for Record {
    fn from(fields: BTreeMap<String, String>) -> Self {
        Self { fields }
    }
}

impl From<Record> for BTreeMap<String, String> {
    fn from(record: Record) -> Self {
        record.fields
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let fields = iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self { fields }
    }
}
