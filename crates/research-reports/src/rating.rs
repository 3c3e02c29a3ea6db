use report_core::RawRecord;
use serde_json::Value;

use crate::reconcile::first_text;

/// Provider star rating (`report_star`), 1 to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarRating {
    StronglyRecommend,
    Recommend,
    Buy,
    Hold,
    Sell,
}

impl StarRating {
    pub fn from_stars(stars: i64) -> Option<Self> {
        match stars {
            5 => Some(StarRating::StronglyRecommend),
            4 => Some(StarRating::Recommend),
            3 => Some(StarRating::Buy),
            2 => Some(StarRating::Hold),
            1 => Some(StarRating::Sell),
            _ => None,
        }
    }

    /// Accepts integral JSON numbers only (`4` or `4.0`).
    pub fn from_value(value: &Value) -> Option<Self> {
        let stars = match value {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0)
                    .map(|f| f as i64)
            })?,
            _ => return None,
        };
        Self::from_stars(stars)
    }

    pub fn label(&self) -> &'static str {
        match self {
            StarRating::StronglyRecommend => "强烈推荐",
            StarRating::Recommend => "推荐",
            StarRating::Buy => "买入",
            StarRating::Hold => "持有",
            StarRating::Sell => "卖出",
        }
    }
}

/// Explicit `rating`/`grade` label first, then the star rating, else empty.
pub fn resolve_rating(record: &RawRecord) -> String {
    let explicit = first_text(record, &["rating", "grade"]);
    if !explicit.is_empty() {
        return explicit;
    }

    record
        .get("report_star")
        .and_then(StarRating::from_value)
        .map(|s| s.label().to_string())
        .unwrap_or_default()
}
