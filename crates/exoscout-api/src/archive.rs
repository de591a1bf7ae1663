use std::time::Duration;

use reqwest::StatusCode;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::retry::{is_retryable_status, with_retry, RetryConfig};

/// Synchronous TAP endpoint of the NASA Exoplanet Archive
pub const ARCHIVE_TAP_SYNC: &str = "https://exoplanetarchive.ipac.caltech.edu/TAP/sync";

/// Planetary Systems table
pub const DEFAULT_TABLE: &str = "ps";

pub const DEFAULT_COLUMNS: [&str; 4] = ["pl_name", "pl_orbper", "pl_rade", "disc_year"];

pub const DEFAULT_USER_AGENT: &str = "exoscout/0.1.0";

/// How much of an error body we keep around for the message
const ERROR_BODY_PREVIEW: usize = 200;

/// One row of a `format=json` TAP response, keys exactly as the archive sent them
pub type ArchiveRow = Map<String, Value>;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Archive returned status {status}: {body}")]
    RequestFailed { status: StatusCode, body: String },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl ArchiveError {
    /// Transient failures only: server errors, throttling, timeouts, dropped connections
    pub fn is_retryable(&self) -> bool {
        match self {
            ArchiveError::RequestFailed { status, .. } => is_retryable_status(*status),
            ArchiveError::NetworkError(e) => e.is_timeout() || e.is_connect(),
            ArchiveError::ParseError(_) | ArchiveError::ClientBuild(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ArchiveError>;

/// The ADQL `SELECT` sent as the `query` parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TapQuery {
    pub table: String,
    pub columns: Vec<String>,
}

impl TapQuery {
    pub fn new(table: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            table: table.into(),
            columns,
        }
    }

    pub fn to_adql(&self) -> String {
        format!("SELECT {} FROM {}", self.columns.join(", "), self.table)
    }
}

impl Default for TapQuery {
    fn default() -> Self {
        Self::new(
            DEFAULT_TABLE,
            DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect(),
        )
    }
}

pub struct ArchiveClient {
    client: reqwest::Client,
    base_url: String,
    query: TapQuery,
    retry_config: RetryConfig,
}

impl ArchiveClient {
    /// Client for the public archive with no timeout and no retries
    pub fn new() -> Result<Self> {
        Self::with_options(ARCHIVE_TAP_SYNC.to_string(), DEFAULT_USER_AGENT, None)
    }

    /// For mirrors, proxies and local test servers
    pub fn with_options(
        base_url: String,
        user_agent: &str,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        let agent = reqwest::header::HeaderValue::from_str(user_agent)
            .map_err(|e| ArchiveError::ClientBuild(format!("invalid user agent: {}", e)))?;
        headers.insert(reqwest::header::USER_AGENT, agent);

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| ArchiveError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            query: TapQuery::default(),
            retry_config: RetryConfig::default(),
        })
    }

    pub fn with_query(mut self, query: TapQuery) -> Self {
        self.query = query;
        self
    }

    pub fn with_retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.retry_config = retry_config;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn query(&self) -> &TapQuery {
        &self.query
    }

    /// Run the configured query and return every row of the response
    pub async fn fetch_rows(&self) -> Result<Vec<ArchiveRow>> {
        let adql = self.query.to_adql();
        debug!("Querying {} with: {}", self.base_url, adql);

        with_retry(&self.retry_config, ArchiveError::is_retryable, || async {
            let response = self
                .client
                .get(&self.base_url)
                .query(&[("query", adql.as_str()), ("format", "json")])
                .send()
                .await?;

            let status = response.status();
            let body = response.text().await?;
            decode_response(status, &body)
        })
        .await
    }
}

/// Turn a status and body into rows
///
/// Anything but 200 is a failure. A 200 whose body is valid JSON but not an
/// array of objects yields no rows at all.
pub fn decode_response(status: StatusCode, body: &str) -> Result<Vec<ArchiveRow>> {
    if status != StatusCode::OK {
        return Err(ArchiveError::RequestFailed {
            status,
            body: body.chars().take(ERROR_BODY_PREVIEW).collect(),
        });
    }

    let value: Value = serde_json::from_str(body)?;
    Ok(rows_from_value(value))
}

/// All-or-nothing: one non-object element discards the whole body
pub fn rows_from_value(value: Value) -> Vec<ArchiveRow> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            warn!("Archive body is {}, not an array; treating as zero rows", kind(&other));
            return Vec::new();
        }
    };

    let mut rows = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Object(row) => rows.push(row),
            other => {
                warn!(
                    "Archive array holds {} instead of an object; treating as zero rows",
                    kind(&other)
                );
                return Vec::new();
            }
        }
    }
    rows
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
