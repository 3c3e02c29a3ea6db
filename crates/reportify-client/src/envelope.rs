use report_core::{RawRecord, ReportError};
use serde::Serialize;
use serde_json::{Map, Value};

/// Keys the provider has used for the record list, highest priority first.
pub const ENVELOPE_KEYS: [&str; 4] = ["reports", "data", "items", "result"];

/// Characters of a response body kept in errors
pub const BODY_SNIPPET_CHARS: usize = 200;

pub fn snippet(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_CHARS).collect()
}

fn value_snippet<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value)
        .map(|s| snippet(&s))
        .unwrap_or_default()
}

/// One decoded page of provider results.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub records: Vec<RawRecord>,
    /// Which of [`ENVELOPE_KEYS`] held the records
    pub envelope_key: &'static str,
    pub total_count: Option<u64>,
    pub page_num: Option<u64>,
    pub page_size: Option<u64>,
}

impl Page {
    /// Decode a response body.
    ///
    /// The first key of [`ENVELOPE_KEYS`] present in the body is used even
    /// if its list is empty.
    pub fn from_envelope(body: Value) -> Result<Self, ReportError> {
        let mut obj = match body {
            Value::Object(obj) => obj,
            other => {
                return Err(ReportError::Decode(format!(
                    "envelope is not a JSON object: {}",
                    value_snippet(&other)
                )))
            }
        };

        let Some(key) = record_key(&obj) else {
            return Err(ReportError::MissingEnvelope {
                found: obj.keys().cloned().collect(),
                body: value_snippet(&obj),
            });
        };

        let items = match obj.remove(key).unwrap_or(Value::Null) {
            Value::Array(items) => items,
            other => {
                return Err(ReportError::Decode(format!(
                    "`{}` is not a list (got {}): {}",
                    key,
                    json_kind(&other),
                    value_snippet(&obj)
                )))
            }
        };

        let total = items.len();
        let records: Vec<RawRecord> = items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(record) => Some(record),
                _ => None,
            })
            .collect();
        if records.len() < total {
            tracing::warn!(
                "Skipped {} non-object entries under `{}`",
                total - records.len(),
                key
            );
        }

        Ok(Self {
            records,
            envelope_key: key,
            total_count: obj.get("total_count").and_then(Value::as_u64),
            page_num: obj.get("page_num").and_then(Value::as_u64),
            page_size: obj.get("page_size").and_then(Value::as_u64),
        })
    }
}

/// First envelope key present in `obj`, in priority order.
pub fn record_key(obj: &Map<String, Value>) -> Option<&'static str> {
    ENVELOPE_KEYS.into_iter().find(|k| obj.contains_key(*k))
}

/// Structure of one raw response, for checking how the provider currently
/// shapes its envelope and records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvelopeSummary {
    pub keys: Vec<String>,
    pub total_count: Option<u64>,
    pub page_num: Option<u64>,
    pub page_size: Option<u64>,
    pub record_key: Option<String>,
    pub record_count: usize,
    /// Field names of the first record
    pub first_record_fields: Vec<String>,
}

impl EnvelopeSummary {
    pub fn from_body(body: &Value) -> Self {
        let empty = Map::new();
        let obj = body.as_object().unwrap_or(&empty);
        let key = record_key(obj);
        let list = key
            .and_then(|k| obj.get(k))
            .and_then(Value::as_array);

        Self {
            keys: obj.keys().cloned().collect(),
            total_count: obj.get("total_count").and_then(Value::as_u64),
            page_num: obj.get("page_num").and_then(Value::as_u64),
            page_size: obj.get("page_size").and_then(Value::as_u64),
            record_key: key.map(str::to_string),
            record_count: list.map(Vec::len).unwrap_or(0),
            first_record_fields: list
                .and_then(|l| l.first())
                .and_then(Value::as_object)
                .map(|r| r.keys().cloned().collect())
                .unwrap_or_default(),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
