use anyhow::{Context, Result};
use reportify_client::ReportifyClient;
use research_reports::{
    aggregate_keyword, aggregate_keywords, analysis_request, single_keyword_report_type,
    ReportCollector, MULTI_KEYWORD_REPORT_TYPE,
};

mod config;

use config::{Invocation, ScannerConfig};

/// Records requested by `probe`
const PROBE_PAGE_SIZE: u32 = 5;

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    // Logs go to stderr; stdout carries the JSON output
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = ScannerConfig::from_env().context("invalid configuration")?;
    init_tracing(config.json_logging);

    let invocation = Invocation::parse(std::env::args().skip(1), &config)?;
    let client = ReportifyClient::new(config.client.clone());
    tracing::info!("Research report endpoint: {}", client.base_url());

    match invocation {
        Invocation::Probe(keyword) => {
            let summary = client
                .probe(&keyword, PROBE_PAGE_SIZE)
                .await
                .with_context(|| format!("probe for '{keyword}' failed"))?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Invocation::Scan(keywords) => {
            let multi = keywords.len() > 1;
            let options = config.collect_options(multi);
            tracing::info!(
                "Scanning {} ({} pages x {}, last {} days)",
                keywords.join(", "),
                options.page_count,
                options.page_size,
                options.days_limit
            );

            let collector = ReportCollector::new(client, options);
            let (aggregate, report_type) = if multi {
                (
                    aggregate_keywords(&collector, keywords.as_slice()).await,
                    MULTI_KEYWORD_REPORT_TYPE.to_string(),
                )
            } else {
                (
                    aggregate_keyword(&collector, &keywords[0]).await,
                    single_keyword_report_type(&keywords[0]),
                )
            };

            tracing::info!("Fetched {} reports", aggregate.total_reports());
            for (word, count) in aggregate.keyword_counts() {
                tracing::info!("  {}: {} reports", word, count);
            }
            if aggregate.total_reports() == 0 {
                tracing::warn!("No research reports found");
            }

            let request = analysis_request(aggregate, report_type);
            tracing::info!("Institutions covered: {}", request.platforms.len());
            println!("{}", serde_json::to_string_pretty(&request)?);
        }
    }

    Ok(())
}
