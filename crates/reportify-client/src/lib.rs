pub mod envelope;

pub use envelope::{EnvelopeSummary, Page, BODY_SNIPPET_CHARS, ENVELOPE_KEYS};

use async_trait::async_trait;
use chrono::Utc;
use report_core::{PageRequest, RawRecord, ReportError, ReportSource};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

const BASE_URL: &str = "https://api.reportify.cn/reports";

/// Provider report-type codes queried on every request
pub const REPORT_TYPES: &str = "7,8,9,10,11,16,19,20,21,22,23,24,25";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Full endpoint URL, query string excluded
    pub base_url: String,
    pub report_types: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            report_types: REPORT_TYPES.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// HTTP client for the Reportify research-report search endpoint.
#[derive(Clone)]
pub struct ReportifyClient {
    client: Client,
    config: ClientConfig,
}

impl ReportifyClient {
    pub fn new(config: ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, config }
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// GET one page and return the decoded JSON body.
    async fn get_page_body(&self, request: &PageRequest) -> Result<Value, ReportError> {
        // Cache-buster; the endpoint otherwise serves stale pages
        let rt = Utc::now().timestamp_millis().to_string();
        let page_num = request.page_num.to_string();
        let page_size = request.page_size.to_string();

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("page_num", page_num.as_str()),
                ("page_size", page_size.as_str()),
                ("report_types", self.config.report_types.as_str()),
                ("query", request.keyword.as_str()),
                ("rt", rt.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ReportError::Transport(e.to_string()))?;

        tracing::debug!("Reportify GET {} -> {}", response.url(), response.status());

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReportError::HttpStatus {
                status: status.as_u16(),
                body: envelope::snippet(&body),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ReportError::Transport(e.to_string()))?;
        serde_json::from_str::<Value>(&body)
            .map_err(|e| ReportError::Decode(format!("{}: {}", e, envelope::snippet(&body))))
    }

    /// Fetch and decode one page, surfacing every failure.
    pub async fn try_fetch_page(&self, request: &PageRequest) -> Result<Page, ReportError> {
        let body = self.get_page_body(request).await?;
        let page = Page::from_envelope(body)?;

        tracing::debug!(
            "Reportify page {} for '{}': {} records under `{}`",
            request.page_num,
            request.keyword,
            page.records.len(),
            page.envelope_key
        );
        Ok(page)
    }

    /// Describe the envelope returned for the first page of `keyword`.
    pub async fn probe(&self, keyword: &str, page_size: u32) -> Result<EnvelopeSummary, ReportError> {
        let request = PageRequest {
            keyword: keyword.to_string(),
            page_num: 1,
            page_size,
        };
        let body = self.get_page_body(&request).await?;
        Ok(EnvelopeSummary::from_body(&body))
    }
}

#[async_trait]
impl ReportSource for ReportifyClient {
    async fn fetch_page(&self, request: &PageRequest) -> Vec<RawRecord> {
        match self.try_fetch_page(request).await {
            Ok(page) => page.records,
            Err(e) => {
                tracing::warn!(
                    "Reportify page {} for '{}' dropped: {}",
                    request.page_num,
                    request.keyword,
                    e
                );
                Vec::new()
            }
        }
    }
}
