use anyhow::{bail, Context, Result};
use reportify_client::ClientConfig;
use research_reports::CollectOptions;
use std::collections::HashMap;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ScannerConfig {
    pub client: ClientConfig,
    /// Unset means the single/multi keyword default
    pub page_count: Option<u32>,
    pub page_size: u32,
    pub days_limit: u32,
    pub keywords: Vec<String>,
    pub json_logging: bool,
}

impl ScannerConfig {
    pub fn from_env() -> Result<Self> {
        let vars: HashMap<String, String> = env::vars().collect();
        Self::from_vars(&vars)
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        let defaults = ClientConfig::default();
        let get = |key: &str| lookup(vars, key);

        let timeout_secs: u64 = match get("REPORTIFY_TIMEOUT_SECS") {
            Some(v) => v.parse().context("REPORTIFY_TIMEOUT_SECS must be a number of seconds")?,
            None => defaults.timeout.as_secs(),
        };

        let config = Self {
            client: ClientConfig {
                base_url: get("REPORTIFY_BASE_URL")
                    .map(str::to_string)
                    .unwrap_or(defaults.base_url),
                report_types: get("REPORTIFY_REPORT_TYPES")
                    .map(str::to_string)
                    .unwrap_or(defaults.report_types),
                timeout: Duration::from_secs(timeout_secs),
            },
            page_count: get("REPORT_PAGE_COUNT")
                .map(|v| v.parse::<u32>().context("REPORT_PAGE_COUNT must be a positive integer"))
                .transpose()?,
            page_size: get("REPORT_PAGE_SIZE")
                .unwrap_or("20")
                .parse()
                .context("REPORT_PAGE_SIZE must be a positive integer")?,
            days_limit: get("REPORT_DAYS_LIMIT")
                .unwrap_or("90")
                .parse()
                .context("REPORT_DAYS_LIMIT must be a number of days")?,
            keywords: get("REPORT_KEYWORDS")
                .map(split_keywords)
                .unwrap_or_default(),
            json_logging: get("RUST_LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            bail!("REPORT_PAGE_SIZE must be greater than 0");
        }
        if self.page_count == Some(0) {
            bail!("REPORT_PAGE_COUNT must be greater than 0");
        }
        if self.client.timeout.is_zero() {
            bail!("REPORTIFY_TIMEOUT_SECS must be greater than 0");
        }
        Ok(())
    }

    pub fn collect_options(&self, multi_keyword: bool) -> CollectOptions {
        let base = if multi_keyword {
            CollectOptions::multi_keyword()
        } else {
            CollectOptions::default()
        };
        CollectOptions {
            page_count: self.page_count.unwrap_or(base.page_count),
            page_size: self.page_size,
            days_limit: self.days_limit,
        }
    }
}

fn lookup<'a>(vars: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())
}

pub fn split_keywords(raw: &str) -> Vec<String> {
    raw.split([',', '，'])
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Print the envelope structure for one keyword
    Probe(String),
    Scan(Vec<String>),
}

impl Invocation {
    /// `[probe] [KEYWORD ...]`; keywords on the command line replace
    /// `REPORT_KEYWORDS`.
    pub fn parse<I>(args: I, config: &ScannerConfig) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args: Vec<String> = args.into_iter().collect();
        let probe = args.first().is_some_and(|a| a == "probe");
        if probe {
            args.remove(0);
        }

        let keywords: Vec<String> = if args.is_empty() {
            config.keywords.clone()
        } else {
            args.iter().flat_map(|a| split_keywords(a)).collect()
        };

        if keywords.is_empty() {
            bail!("no keywords given (pass them as arguments or set REPORT_KEYWORDS)");
        }

        Ok(if probe {
            Invocation::Probe(keywords[0].clone())
        } else {
            Invocation::Scan(keywords)
        })
    }
}
