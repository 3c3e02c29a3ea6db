use async_trait::async_trait;
use crate::{AnalysisRequest, AnalysisSections, PageRequest, RawRecord, ReportError};

/// Source of paginated raw report records.
///
/// Implementations never fail: a page that cannot be fetched or decoded is
/// returned as an empty list.
#[async_trait]
pub trait ReportSource: Send + Sync {
    async fn fetch_page(&self, request: &PageRequest) -> Vec<RawRecord>;
}

/// Trait for the downstream analysis engine
#[async_trait]
pub trait ReportAnalyzer: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisSections, ReportError>;
}
