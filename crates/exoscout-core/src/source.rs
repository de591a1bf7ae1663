use async_trait::async_trait;

use crate::{models::RawRecord, Result};

/// Where raw records come from
///
/// The session only talks to this trait, so it can be pointed at the live
/// archive, a saved response on disk, or a mock in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// One full retrieval. Failures must come back as `Error::NetworkError`.
    async fn fetch_records(&self) -> Result<Vec<RawRecord>>;

    /// Short label for log lines
    fn describe(&self) -> String;
}
