use report_core::{Aggregate, KeywordGroup, RawRecord, ReportSource};

use crate::collector::ReportCollector;
use crate::reconcile::reconcile;

/// Reconcile every record, in order, into one keyword group.
pub fn group_reports(records: &[RawRecord], keyword: &str) -> KeywordGroup {
    KeywordGroup {
        word: keyword.to_string(),
        titles: records.iter().map(reconcile).collect(),
    }
}

/// Single-keyword transform: always exactly one group, even when `records`
/// is empty.
pub fn transform_single(records: &[RawRecord], keyword: &str) -> Aggregate {
    Aggregate::from(vec![group_reports(records, keyword)])
}

/// Collect and transform one keyword.
pub async fn aggregate_keyword<S: ReportSource>(
    collector: &ReportCollector<S>,
    keyword: &str,
) -> Aggregate {
    let records = collector.collect(keyword).await;
    transform_single(&records, keyword)
}

/// Multi-keyword transform. Keywords are collected one after another;
/// a keyword that yields no records gets no group at all. Blank keywords
/// are skipped without a request.
pub async fn aggregate_keywords<S, K>(collector: &ReportCollector<S>, keywords: &[K]) -> Aggregate
where
    S: ReportSource,
    K: AsRef<str>,
{
    let mut aggregate = Aggregate::new();

    for keyword in keywords.iter().map(AsRef::as_ref) {
        if keyword.trim().is_empty() {
            tracing::warn!("Skipping blank keyword");
            continue;
        }

        let records = collector.collect(keyword).await;
        if records.is_empty() {
            tracing::info!("No reports for '{}', leaving it out", keyword);
            continue;
        }
        aggregate.push(group_reports(&records, keyword));
    }

    aggregate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::test_support::ScriptedSource;
    use crate::collector::CollectOptions;
    use serde_json::json;

    #[test]
    fn test_single_keeps_order() {
        let records: Vec<RawRecord> = ["a", "b", "c"]
            .iter()
            .map(|t| json!({ "title": t }).as_object().cloned().unwrap())
            .collect();
        let agg = transform_single(&records, "X");
        assert_eq!(agg.len(), 1);
        let titles: Vec<_> = agg.groups[0].titles.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_single_with_no_records_still_emits_group() {
        let agg = transform_single(&[], "光伏");
        assert_eq!(agg.len(), 1);
        assert_eq!(agg.groups[0].word, "光伏");
        assert!(agg.groups[0].titles.is_empty());
    }

    #[tokio::test]
    async fn test_aggregate_keyword_emits_group_when_nothing_found() {
        let collector = ReportCollector::new(ScriptedSource::default(), CollectOptions::default());
        let agg = aggregate_keyword(&collector, "Y").await;
        assert_eq!(agg.keyword_counts(), vec![("Y", 0)]);
    }

    #[tokio::test]
    async fn test_multi_drops_empty_keywords() {
        let source = ScriptedSource::default()
            .page("A", 1, vec![json!({ "title": "a1" })])
            .page("C", 2, vec![json!({ "title": "c2" }), json!({ "title": "c2b" })]);
        let collector = ReportCollector::new(source, CollectOptions::multi_keyword());

        let agg = aggregate_keywords(&collector, &["A", "B", "C"]).await;

        assert_eq!(agg.keyword_counts(), vec![("A", 1), ("C", 2)]);
        // B was still queried on every page
        let b_calls = collector
            .source()
            .requested()
            .into_iter()
            .filter(|(k, _)| k == "B")
            .count();
        assert_eq!(b_calls, 2);
    }

    #[tokio::test]
    async fn test_multi_processes_keywords_in_order() {
        let collector = ReportCollector::new(
            ScriptedSource::default(),
            CollectOptions {
                page_count: 1,
                ..CollectOptions::default()
            },
        );
        aggregate_keywords(&collector, &["B".to_string(), "A".to_string()]).await;
        assert_eq!(
            collector.source().requested(),
            vec![("B".to_string(), 1), ("A".to_string(), 1)]
        );
    }

    #[tokio::test]
    async fn test_multi_skips_blank_keywords() {
        let source = ScriptedSource::default().page("", 1, vec![json!({ "title": "x" })]);
        let collector = ReportCollector::new(source, CollectOptions::multi_keyword());

        let agg = aggregate_keywords(&collector, &["", "  "]).await;
        assert!(agg.is_empty());
        assert!(collector.source().requested().is_empty());
    }
}
