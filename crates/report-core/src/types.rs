use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One provider record before reconciliation. Field names and value shapes
/// vary between provider schema variants, so it stays an untyped JSON object.
pub type RawRecord = Map<String, Value>;

/// Canonical research report, built once per raw record.
///
/// Every field is always present; missing provider data becomes an empty
/// string (or `""` for `target_price`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub title: String,
    /// Issuing institution or channel
    pub source_name: String,
    /// `YYYY-MM-DD`, or the provider's own string when it could not be reformatted
    pub time_display: String,
    /// At most 300 characters
    pub summary: String,
    pub rating: String,
    /// Passed through from the provider as-is
    pub target_price: Value,
}

impl Default for Report {
    fn default() -> Self {
        Self {
            title: String::new(),
            source_name: String::new(),
            time_display: String::new(),
            summary: String::new(),
            rating: String::new(),
            target_price: Value::String(String::new()),
        }
    }
}

impl Report {
    /// Re-express this report under the provider's field names.
    ///
    /// Empty fields are left out, the same way the provider omits them.
    pub fn to_raw_record(&self) -> RawRecord {
        let mut raw = RawRecord::new();
        let text_fields = [
            ("title", &self.title),
            ("institution_name", &self.source_name),
            ("publish_at", &self.time_display),
            ("summary", &self.summary),
            ("rating", &self.rating),
        ];
        for (key, value) in text_fields {
            if !value.is_empty() {
                raw.insert(key.to_string(), Value::String(value.clone()));
            }
        }
        if !is_blank(&self.target_price) {
            raw.insert("target_price".to_string(), self.target_price.clone());
        }
        raw
    }
}

/// `null` and `""` are treated as "no value" throughout reconciliation.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// All reports collected for one keyword (industry).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KeywordGroup {
    pub word: String,
    /// Reports in provider page order
    pub titles: Vec<Report>,
}

impl KeywordGroup {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            titles: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

/// Ordered keyword groups handed to the analysis step (`rss_stats`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Aggregate {
    pub groups: Vec<KeywordGroup>,
}

impl Aggregate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, group: KeywordGroup) {
        self.groups.push(group);
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, KeywordGroup> {
        self.groups.iter()
    }

    /// Number of reports across every group
    pub fn total_reports(&self) -> usize {
        self.groups.iter().map(KeywordGroup::len).sum()
    }

    /// `(word, report count)` per group, in aggregate order
    pub fn keyword_counts(&self) -> Vec<(&str, usize)> {
        self.groups
            .iter()
            .map(|g| (g.word.as_str(), g.len()))
            .collect()
    }
}

impl From<Vec<KeywordGroup>> for Aggregate {
    fn from(groups: Vec<KeywordGroup>) -> Self {
        Self { groups }
    }
}

impl<'a> IntoIterator for &'a Aggregate {
    type Item = &'a KeywordGroup;
    type IntoIter = std::slice::Iter<'a, KeywordGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// One page query against the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub keyword: String,
    /// 1-based
    pub page_num: u32,
    pub page_size: u32,
}

/// Report mode flag understood by the analysis step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportMode {
    Daily,
    Current,
    #[default]
    Incremental,
}

/// Input shape expected by the external analysis step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Primary hot-list stats; always empty for research reports
    pub stats: Vec<Value>,
    pub rss_stats: Aggregate,
    pub report_mode: ReportMode,
    pub report_type: String,
    /// Institutions covered by `rss_stats`
    pub platforms: Vec<String>,
    pub keywords: Vec<String>,
}

/// Narrative sections returned by the analysis step.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisSections {
    pub core_trends: String,
    pub sentiment_controversy: String,
    pub signals: String,
    pub rss_insights: String,
    pub outlook_strategy: String,
}
