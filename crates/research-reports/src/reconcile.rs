use report_core::{is_blank, RawRecord, Report};
use serde_json::Value;

use crate::rating::resolve_rating;
use crate::time::PublishTime;

pub const SUMMARY_MAX_CHARS: usize = 300;

/// Map one provider record onto the canonical report shape.
///
/// Field names differ between provider schema variants; each canonical
/// field takes the first non-empty candidate. Nothing here can fail: a
/// missing or misshapen field just leaves its canonical field empty.
pub fn reconcile(record: &RawRecord) -> Report {
    let summary = first_text(record, &["summary"]);

    Report {
        title: first_text(record, &["title", "report_title"]),
        source_name: first_text(record, &["institution_name", "channel_name"]),
        time_display: PublishTime::resolve(record.get("publish_at")).into_display(),
        summary: summary.chars().take(SUMMARY_MAX_CHARS).collect(),
        rating: resolve_rating(record),
        target_price: first_value(record, &["target_price", "price"]),
    }
}

/// Strings as-is, numbers in their JSON rendering; anything else is no text.
fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn first_text(record: &RawRecord, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|k| record.get(*k).and_then(text))
        .unwrap_or_default()
}

fn first_value(record: &RawRecord, keys: &[&str]) -> Value {
    keys.iter()
        .filter_map(|k| record.get(*k))
        .find(|v| !is_blank(v))
        .cloned()
        .unwrap_or_else(|| Value::String(String::new()))
}
