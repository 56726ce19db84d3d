use serde::Serialize;
use serde_json::{Map, Value};

/// Placeholder shown when an upstream record carries no website.
pub const WEBSITE_FALLBACK: &str = "N/A";

/// Canonical, normalized result row.
///
/// Serializes with the upstream capitalized keys so the dispatch payload
/// matches what the scrape endpoint produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataRow {
    #[serde(rename = "SchoolName")]
    pub school_name: String,
    #[serde(rename = "Number")]
    pub number: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Website")]
    pub website: String,
    #[serde(rename = "Email")]
    pub email: Option<String>,
    #[serde(rename = "ResponseNotCustomerSupport")]
    pub response_not_customer_support: Option<String>,
    /// Upstream id, whatever its JSON type. `None` only when the key is missing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Accepted keys per field, most preferred first.
const SCHOOL_NAME_KEYS: &[&str] = &["SchoolName", "schoolName"];
const NUMBER_KEYS: &[&str] = &["Number", "number"];
const ADDRESS_KEYS: &[&str] = &["Address", "address"];
const WEBSITE_KEYS: &[&str] = &["Website", "website"];
const EMAIL_KEYS: &[&str] = &["Email", "email"];
const RESPONSE_KEYS: &[&str] = &["ResponseNotCustomerSupport", "responseNotCustomerSupport"];

/// Normalize a whole scrape response body into a result set.
///
/// A missing, `null` or non-array `data` key yields an empty set.
pub fn normalize_response(body: &Value) -> Vec<DataRow> {
    match body.get("data") {
        Some(Value::Array(records)) => records.iter().map(normalize_record).collect(),
        _ => Vec::new(),
    }
}

/// Normalize one upstream record. Never fails: anything that is not an
/// object is treated as an empty record and gets every default.
pub fn normalize_record(record: &Value) -> DataRow {
    let empty = Map::new();
    let fields = record.as_object().unwrap_or(&empty);

    DataRow {
        school_name: resolve_text(fields, SCHOOL_NAME_KEYS).unwrap_or_default(),
        number: resolve_text(fields, NUMBER_KEYS).unwrap_or_default(),
        address: resolve_text(fields, ADDRESS_KEYS).unwrap_or_default(),
        website: resolve_text(fields, WEBSITE_KEYS)
            .unwrap_or_else(|| WEBSITE_FALLBACK.to_string()),
        email: resolve_text(fields, EMAIL_KEYS),
        response_not_customer_support: resolve_text(fields, RESPONSE_KEYS),
        id: fields.get("id").cloned(),
        created_at: fields.get("createdAt").and_then(passthrough_text),
        updated_at: fields.get("updatedAt").and_then(passthrough_text),
    }
}

fn resolve_text(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .find_map(truthy_text)
}

/// Upstream values count as present only when truthy: empty strings, `null`,
/// `false` and zero fall through to the next alias.
fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
        _ => None,
    }
}

fn passthrough_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
