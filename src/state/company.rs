// Company records and dataset
// Defines the record shape stored in the backing file and the name lookup

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field holding the company's unique (case-insensitive) name
pub const NAME_FIELD: &str = "Company";

/// Fields every created company must carry, in sorted order
pub const REQUIRED_FIELDS: [&str; 6] = [
    "Company", "HomePage", "Hubs", "Logo", "Revenue", "Services",
];

/// Company record
///
/// Stored exactly as supplied by the caller: the required fields plus any
/// extra keys, in insertion order. Values are not normalized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Company(Map<String, Value>);

impl Company {
    /// Wrap a JSON object as a company record
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// The company name, if present and a string
    pub fn name(&self) -> Option<&str> {
        self.0.get(NAME_FIELD).and_then(Value::as_str)
    }

    /// Required fields absent from this record, sorted
    pub fn missing_fields(&self) -> Vec<String> {
        REQUIRED_FIELDS
            .iter()
            .filter(|field| !self.0.contains_key(**field))
            .map(|field| field.to_string())
            .collect()
    }

    /// Shallow merge: every key in `updates` replaces the stored value,
    /// keys absent from `updates` are left alone
    pub fn merge(&mut self, updates: Map<String, Value>) {
        for (key, value) in updates {
            self.0.insert(key, value);
        }
    }

    /// Whether this record's name matches `name` case-insensitively
    pub fn matches_name(&self, name: &str) -> bool {
        normalize_name(self.name().unwrap_or_default()) == normalize_name(name)
    }

    /// Field rendered as plain text; missing and null fields are empty
    pub fn text(&self, key: &str) -> String {
        self.0.get(key).map(display_value).unwrap_or_default()
    }

    /// Hub names of this company
    ///
    /// Accepts `{"Hub": [..]}`, `{"Hub": "single"}`, a bare list, or a flat
    /// string. Anything else yields no hubs.
    pub fn hubs(&self) -> Vec<String> {
        match self.0.get("Hubs") {
            Some(Value::Object(hubs)) => match hubs.get("Hub") {
                Some(Value::Array(list)) => list.iter().map(display_value).collect(),
                Some(single) => vec![display_value(single)],
                None => Vec::new(),
            },
            Some(Value::Array(list)) => list.iter().map(display_value).collect(),
            Some(Value::String(hub)) if !hub.is_empty() => vec![hub.clone()],
            _ => Vec::new(),
        }
    }
}

/// Full company collection as stored in the backing file
///
/// Unknown top-level keys are kept in `extra` so a rewrite does not drop them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Companies in stored order
    #[serde(default)]
    pub companies: Vec<Company>,
    /// Any other top-level keys of the document
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Normalize a company name for comparison (trimmed, lowercased)
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Find the first company whose name matches `name` case-insensitively
pub fn find_by_name<'a>(companies: &'a [Company], name: &str) -> Option<&'a Company> {
    companies.iter().find(|company| company.matches_name(name))
}

/// Index of the first company whose name matches `name` case-insensitively
pub fn position_by_name(companies: &[Company], name: &str) -> Option<usize> {
    companies.iter().position(|company| company.matches_name(name))
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
