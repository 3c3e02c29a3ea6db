//! Research-report pipeline: page collection with recency filtering,
//! reconciliation of provider records into canonical reports, and
//! per-keyword aggregation for the analysis step.

pub mod aggregate;
pub mod collector;
pub mod filter;
pub mod index;
pub mod rating;
pub mod reconcile;
pub mod request;
pub mod time;

#[cfg(test)]
mod tests;

pub use aggregate::{aggregate_keyword, aggregate_keywords, group_reports, transform_single};
pub use collector::{CollectOptions, ReportCollector};
pub use filter::RecencyFilter;
pub use index::{institutions, keywords};
pub use rating::{resolve_rating, StarRating};
pub use reconcile::reconcile;
pub use request::{
    analysis_request, run_analysis, single_keyword_report_type, MULTI_KEYWORD_REPORT_TYPE,
};
pub use time::PublishTime;
