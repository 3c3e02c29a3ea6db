use chrono::{DateTime, Local, NaiveDate};
use serde_json::Value;

/// Numeric timestamps above this magnitude are in milliseconds
const MILLIS_THRESHOLD: f64 = 1e12;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A raw `publish_at` value resolved as far as it can be.
#[derive(Debug, Clone, PartialEq)]
pub enum PublishTime {
    /// No value, or a falsy one (`null`, `""`, `0`)
    Absent,
    Resolved { at: DateTime<Local>, display: String },
    /// Present but not interpretable as a point in time
    Unresolved { display: String },
}

impl PublishTime {
    pub fn resolve(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => PublishTime::Absent,
            Some(Value::Number(n)) => match n.as_f64() {
                Some(t) if t == 0.0 => PublishTime::Absent,
                Some(t) => Self::from_unix(t),
                None => PublishTime::Unresolved { display: String::new() },
            },
            Some(Value::String(s)) if s.is_empty() => PublishTime::Absent,
            Some(Value::String(s)) => Self::from_date_str(s),
            Some(_) => PublishTime::Unresolved { display: String::new() },
        }
    }

    /// Unix timestamp in seconds, or milliseconds when above 10^12.
    pub fn from_unix(t: f64) -> Self {
        let secs = if t.abs() > MILLIS_THRESHOLD { t / 1000.0 } else { t };
        let whole = secs.floor();
        let nanos = ((secs - whole) * 1e9) as u32;

        match DateTime::from_timestamp(whole as i64, nanos) {
            Some(utc) if secs.is_finite() => {
                let at = utc.with_timezone(&Local);
                PublishTime::Resolved {
                    display: at.format(DATE_FORMAT).to_string(),
                    at,
                }
            }
            _ => PublishTime::Unresolved { display: String::new() },
        }
    }

    /// Strict `YYYY-MM-DD`, taken as local midnight. The string itself is
    /// kept as the display value either way.
    pub fn from_date_str(s: &str) -> Self {
        let at = NaiveDate::parse_from_str(s, DATE_FORMAT)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .and_then(|dt| dt.and_local_timezone(Local).earliest());

        match at {
            Some(at) => PublishTime::Resolved {
                at,
                display: s.to_string(),
            },
            None => PublishTime::Unresolved {
                display: s.to_string(),
            },
        }
    }

    pub fn instant(&self) -> Option<DateTime<Local>> {
        match self {
            PublishTime::Resolved { at, .. } => Some(*at),
            _ => None,
        }
    }

    pub fn display(&self) -> &str {
        match self {
            PublishTime::Absent => "",
            PublishTime::Resolved { display, .. } | PublishTime::Unresolved { display } => display,
        }
    }

    pub fn into_display(self) -> String {
        match self {
            PublishTime::Absent => String::new(),
            PublishTime::Resolved { display, .. } | PublishTime::Unresolved { display } => display,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_seconds_and_millis_resolve_to_same_instant() {
        let secs = PublishTime::resolve(Some(&json!(1700000000)));
        let millis = PublishTime::resolve(Some(&json!(1700000000000i64)));
        assert!(secs.instant().is_some());
        assert_eq!(secs.instant(), millis.instant());
        assert_eq!(secs.display(), millis.display());
    }

    #[test]
    fn test_numeric_display_is_local_date() {
        let t = PublishTime::resolve(Some(&json!(1700000000)));
        let expected = Local
            .timestamp_opt(1_700_000_000, 0)
            .unwrap()
            .format("%Y-%m-%d")
            .to_string();
        assert_eq!(t.display(), expected);
    }

    #[test]
    fn test_fractional_millis() {
        let t = PublishTime::resolve(Some(&json!(1700000000500.0)));
        let at = t.instant().unwrap();
        assert_eq!(at.timestamp(), 1_700_000_000);
        assert_eq!(at.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn test_threshold_boundary_is_seconds() {
        // Exactly 10^12 is not above the threshold
        let t = PublishTime::from_unix(1e12);
        assert_eq!(t.instant().unwrap().timestamp(), 1_000_000_000_000);
    }

    #[test]
    fn test_date_string() {
        let t = PublishTime::resolve(Some(&json!("2024-03-15")));
        let expected = Local.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).earliest().unwrap();
        assert_eq!(t.instant(), Some(expected));
        assert_eq!(t.display(), "2024-03-15");
    }

    #[test]
    fn test_unparseable_string_passes_through() {
        for raw in ["2024/03/15", "2024-03-15 10:00:00", "昨天", "2024-13-01"] {
            let t = PublishTime::resolve(Some(&json!(raw)));
            assert_eq!(t, PublishTime::Unresolved { display: raw.to_string() });
        }
    }

    #[test]
    fn test_falsy_values_are_absent() {
        assert_eq!(PublishTime::resolve(None), PublishTime::Absent);
        assert_eq!(PublishTime::resolve(Some(&json!(null))), PublishTime::Absent);
        assert_eq!(PublishTime::resolve(Some(&json!(""))), PublishTime::Absent);
        assert_eq!(PublishTime::resolve(Some(&json!(0))), PublishTime::Absent);
        assert_eq!(PublishTime::Absent.display(), "");
    }

    #[test]
    fn test_other_shapes_are_unresolved() {
        for v in [json!(true), json!([1]), json!({ "ts": 1 })] {
            let t = PublishTime::resolve(Some(&v));
            assert_eq!(t, PublishTime::Unresolved { display: String::new() });
        }
    }

    #[test]
    fn test_out_of_range_timestamp_is_unresolved() {
        let t = PublishTime::from_unix(1e300);
        assert!(t.instant().is_none());
        assert_eq!(t.display(), "");
    }
}
