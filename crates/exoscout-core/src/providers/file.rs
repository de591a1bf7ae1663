// File provider - replays a saved archive response from disk
use std::path::PathBuf;

use async_trait::async_trait;
use exoscout_api::archive::rows_from_value;
use tracing::info;

use crate::{models::RawRecord, source::RecordSource, Error, Result};

/// Reads a JSON file in the same shape as the archive's `format=json` body
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RecordSource for FileSource {
    async fn fetch_records(&self) -> Result<Vec<RawRecord>> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            Error::NetworkError(format!("Failed to read {}: {}", self.path.display(), e))
        })?;

        let value: serde_json::Value = serde_json::from_str(&contents).map_err(|e| {
            Error::NetworkError(format!("Malformed JSON in {}: {}", self.path.display(), e))
        })?;

        let rows = rows_from_value(value);
        info!("Loaded {} rows from {}", rows.len(), self.path.display());
        Ok(rows.into_iter().map(RawRecord::from).collect())
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
