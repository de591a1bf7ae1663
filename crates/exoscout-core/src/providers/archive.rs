// Archive provider - bridges the TAP client with the RecordSource trait
use std::time::Duration;

use async_trait::async_trait;
use exoscout_api::{ArchiveClient, RetryConfig, TapQuery};
use tracing::info;

use crate::{config::ArchiveConfig, models::RawRecord, source::RecordSource, Error, Result};

/// Wrapper around ArchiveClient that implements RecordSource
pub struct ArchiveSource {
    client: ArchiveClient,
}

impl ArchiveSource {
    pub fn from_config(config: &ArchiveConfig) -> Result<Self> {
        let client = ArchiveClient::with_options(
            config.url.clone(),
            &config.user_agent,
            config.timeout_secs.map(Duration::from_secs),
        )
        .map_err(|e| Error::ConfigError(e.to_string()))?
        .with_query(TapQuery::new(config.table.clone(), config.columns.clone()))
        .with_retry_config(RetryConfig::with_max_retries(config.max_retries));

        Ok(Self { client })
    }
}

#[async_trait]
impl RecordSource for ArchiveSource {
    async fn fetch_records(&self) -> Result<Vec<RawRecord>> {
        let rows = self.client.fetch_rows().await?;
        info!("Archive returned {} rows", rows.len());
        Ok(rows.into_iter().map(RawRecord::from).collect())
    }

    fn describe(&self) -> String {
        format!(
            "archive {} ({})",
            self.client.base_url(),
            self.client.query().to_adql()
        )
    }
}
