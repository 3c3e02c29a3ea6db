use report_core::{
    Aggregate, AnalysisRequest, AnalysisSections, ReportAnalyzer, ReportError, ReportMode,
};

use crate::index;

pub const MULTI_KEYWORD_REPORT_TYPE: &str = "多行业研报分析";

pub fn single_keyword_report_type(keyword: &str) -> String {
    format!("{keyword}行业研报分析")
}

/// Shape an aggregate into the analysis input, with its institution and
/// keyword indexes as `platforms` and `keywords`.
pub fn analysis_request(aggregate: Aggregate, report_type: impl Into<String>) -> AnalysisRequest {
    let platforms = index::institutions(&aggregate);
    let keywords = index::keywords(&aggregate);

    AnalysisRequest {
        stats: Vec::new(),
        rss_stats: aggregate,
        report_mode: ReportMode::Incremental,
        report_type: report_type.into(),
        platforms,
        keywords,
    }
}

/// Hand a request to the analyzer. Returns `None` without calling it when
/// the request carries no reports.
pub async fn run_analysis<A: ReportAnalyzer + ?Sized>(
    analyzer: &A,
    request: &AnalysisRequest,
) -> Result<Option<AnalysisSections>, ReportError> {
    if request.rss_stats.total_reports() == 0 {
        tracing::info!("No reports for '{}', skipping analysis", request.report_type);
        return Ok(None);
    }

    tracing::info!(
        "Analyzing {} reports from {} institutions",
        request.rss_stats.total_reports(),
        request.platforms.len()
    );
    analyzer.analyze(request).await.map(Some)
}
