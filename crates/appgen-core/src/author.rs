//! Author field normalization
//!
//! A manifest's `author` field may be a structured record, a free-form string
//! following the `Name <email> (url)` convention, or absent entirely. Parsing
//! is best-effort: malformed strings degrade to partial fields, never errors.

use serde_json::Value;

/// Normalized author information derived from the destination manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub url: Option<String>,
}

impl AuthorInfo {
    /// Derive author info from a manifest's `author` field.
    ///
    /// Structured records have their `name`/`email`/`url` sub-fields copied
    /// directly; strings go through [`parse_author_string`]; anything else
    /// yields an entirely absent author.
    pub fn from_manifest_field(field: Option<&Value>) -> Self {
        match field {
            Some(Value::Object(record)) => Self {
                name: string_field(record, "name"),
                email: string_field(record, "email"),
                url: string_field(record, "url"),
            },
            Some(Value::String(raw)) => parse_author_string(raw),
            _ => Self::default(),
        }
    }

    /// Author record for a generated manifest: name and email only, present
    /// only when at least one of them is known.
    pub fn manifest_value(&self) -> Option<Value> {
        let mut record = serde_json::Map::new();
        if let Some(name) = &self.name {
            record.insert("name".to_string(), Value::String(name.clone()));
        }
        if let Some(email) = &self.email {
            record.insert("email".to_string(), Value::String(email.clone()));
        }
        (!record.is_empty()).then(|| Value::Object(record))
    }
}

fn string_field(record: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    record.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Parse the `Name <email> (url)` convention.
///
/// The email and url segments are optional and independently detectable by
/// their delimiters; whatever precedes the first delimiter, trimmed, is the
/// name.
pub fn parse_author_string(input: &str) -> AuthorInfo {
    let name_end = input.find(['<', '(']).unwrap_or(input.len());
    let name = input[..name_end].trim();

    AuthorInfo {
        name: (!name.is_empty()).then(|| name.to_string()),
        email: delimited(input, '<', '>'),
        url: delimited(input, '(', ')'),
    }
}

fn delimited(input: &str, open: char, close: char) -> Option<String> {
    let start = input.find(open)? + open.len_utf8();
    let end = input[start..].find(close)? + start;
    let value = input[start..end].trim();
    (!value.is_empty()).then(|| value.to_string())
}
