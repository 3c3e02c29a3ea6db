use chrono::{Duration, Local};
use report_core::RawRecord;
use serde_json::json;

use crate::collector::test_support::ScriptedSource;
use crate::*;

fn options(page_count: u32, days_limit: u32) -> CollectOptions {
    CollectOptions {
        page_count,
        page_size: 20,
        days_limit,
    }
}

#[tokio::test]
async fn test_recent_star_rated_report_survives_stale_one_dropped() {
    let two_days_ago = (Local::now() - Duration::days(2)).timestamp_millis();
    let source = ScriptedSource::default().page(
        "X",
        1,
        vec![
            json!({ "title": "Foo", "report_star": 5, "publish_at": two_days_ago }),
            json!({ "title": "Bar", "grade": "Hold", "publish_at": "2000-01-01" }),
        ],
    );
    let collector = ReportCollector::new(source, options(1, 90));

    let agg = aggregate_keyword(&collector, "X").await;

    assert_eq!(agg.len(), 1);
    let group = &agg.groups[0];
    assert_eq!(group.word, "X");
    assert_eq!(group.titles.len(), 1);
    assert_eq!(group.titles[0].title, "Foo");
    assert_eq!(group.titles[0].rating, "强烈推荐");
    assert_eq!(
        group.titles[0].time_display,
        (Local::now() - Duration::days(2)).format("%Y-%m-%d").to_string()
    );
}

#[tokio::test]
async fn test_undated_report_kept_for_any_day_limit() {
    for days_limit in [0, 1, 90] {
        let source = ScriptedSource::default().page("X", 1, vec![json!({ "title": "undated" })]);
        let collector = ReportCollector::new(source, options(1, days_limit));
        let records: Vec<RawRecord> = collector.collect("X").await;
        assert_eq!(records.len(), 1, "days_limit={days_limit}");
    }
}

#[tokio::test]
async fn test_multi_keyword_aggregate_omits_empty_keyword() {
    let source = ScriptedSource::default().page(
        "A",
        1,
        vec![json!({ "title": "a", "institution_name": "中信证券" })],
    );
    let collector = ReportCollector::new(source, CollectOptions::multi_keyword());

    let agg = aggregate_keywords(&collector, &["A", "B"]).await;

    assert_eq!(agg.len(), 1);
    assert_eq!(agg.groups[0].word, "A");
    assert_eq!(keywords(&agg), vec!["A"]);
    assert_eq!(institutions(&agg), vec!["中信证券"]);
}

#[tokio::test]
async fn test_mixed_provider_schemas_in_one_page() {
    let source = ScriptedSource::default().page(
        "光伏",
        1,
        vec![
            json!({
                "title": "硅料价格跟踪",
                "institution_name": "华泰证券",
                "rating": "增持",
                "target_price": 32.1,
            }),
            json!({
                "report_title": "组件出口点评",
                "channel_name": "行业研究",
                "report_star": 3,
                "price": "12.00",
            }),
        ],
    );
    let collector = ReportCollector::new(source, options(2, 90));

    let request = analysis_request(
        aggregate_keyword(&collector, "光伏").await,
        single_keyword_report_type("光伏"),
    );

    let titles = &request.rss_stats.groups[0].titles;
    assert_eq!(titles[0].source_name, "华泰证券");
    assert_eq!(titles[0].rating, "增持");
    assert_eq!(titles[1].title, "组件出口点评");
    assert_eq!(titles[1].rating, "买入");
    assert_eq!(titles[1].target_price, json!("12.00"));

    let mut expected = vec!["华泰证券", "行业研究"];
    expected.sort();
    assert_eq!(request.platforms, expected);
    assert_eq!(request.keywords, vec!["光伏"]);
}
