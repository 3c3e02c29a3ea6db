use report_core::{PageRequest, RawRecord, ReportSource};

use crate::filter::RecencyFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectOptions {
    /// Pages fetched per keyword, starting at 1
    pub page_count: u32,
    pub page_size: u32,
    /// Records older than this many days are dropped
    pub days_limit: u32,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            page_count: 3,
            page_size: 20,
            days_limit: 90,
        }
    }
}

impl CollectOptions {
    /// Defaults used when several keywords are collected in one run
    pub fn multi_keyword() -> Self {
        Self {
            page_count: 2,
            ..Self::default()
        }
    }
}

/// Walks the pages of one keyword and keeps the records that pass the
/// recency filter.
pub struct ReportCollector<S> {
    source: S,
    options: CollectOptions,
}

impl<S: ReportSource> ReportCollector<S> {
    pub fn new(source: S, options: CollectOptions) -> Self {
        Self { source, options }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn options(&self) -> CollectOptions {
        self.options
    }

    /// Collect with a cutoff of `days_limit` days before now.
    pub async fn collect(&self, keyword: &str) -> Vec<RawRecord> {
        let filter = RecencyFilter::within_days(self.options.days_limit);
        self.collect_with(keyword, &filter).await
    }

    /// Every page from 1 to `page_count` is requested in order. An empty
    /// page does not end the walk: it may be a failed fetch rather than
    /// the end of the results.
    pub async fn collect_with(&self, keyword: &str, filter: &RecencyFilter) -> Vec<RawRecord> {
        let mut collected = Vec::new();

        for page_num in 1..=self.options.page_count {
            let request = PageRequest {
                keyword: keyword.to_string(),
                page_num,
                page_size: self.options.page_size,
            };
            let records = self.source.fetch_page(&request).await;
            let fetched = records.len();
            let before = collected.len();

            collected.extend(records.into_iter().filter(|r| filter.admits(r)));

            tracing::debug!(
                "'{}' page {}/{}: kept {} of {} records",
                keyword,
                page_num,
                self.options.page_count,
                collected.len() - before,
                fetched
            );
        }

        tracing::info!(
            "Collected {} reports for '{}' (last {} days, {} pages)",
            collected.len(),
            keyword,
            self.options.days_limit,
            self.options.page_count
        );
        collected
    }
}
