// Session: owns the record lists between pipeline stages
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::{
    models::{PlanetRecord, RawRecord},
    processor,
    projection::{self, Projection},
    search,
    source::RecordSource,
    Error, Result,
};

/// Where a session is in the fetch → process pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing fetched yet
    Empty,
    /// Raw records held, not filtered yet
    Fetched,
    /// Filtered records held; search and projection are available
    Processed,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Empty => write!(f, "empty"),
            SessionState::Fetched => write!(f, "fetched"),
            SessionState::Processed => write!(f, "processed"),
        }
    }
}

/// One user's view of the pipeline
///
/// Every failed call leaves the session untouched, so the last good fetch
/// and process results stay usable. Processed records are always rebuilt
/// from the current raw records and are dropped whenever a new fetch lands.
#[derive(Debug, Default)]
pub struct Session {
    raw: Option<Vec<RawRecord>>,
    fetched_at: Option<DateTime<Utc>>,
    processed: Option<Vec<PlanetRecord>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        match (&self.raw, &self.processed) {
            (None, _) => SessionState::Empty,
            (Some(_), None) => SessionState::Fetched,
            (Some(_), Some(_)) => SessionState::Processed,
        }
    }

    /// Replace the raw records with a fresh retrieval; returns how many arrived
    pub async fn fetch<S>(&mut self, source: &S) -> Result<usize>
    where
        S: RecordSource + ?Sized,
    {
        info!("Fetching records from {}", source.describe());

        let records = match source.fetch_records().await {
            Ok(records) => records,
            Err(e) => {
                warn!("Fetch failed, keeping {} session: {}", self.state(), e);
                return Err(e);
            }
        };

        let count = records.len();
        self.raw = Some(records);
        self.processed = None;
        self.fetched_at = Some(Utc::now());

        info!("Fetched {} records", count);
        Ok(count)
    }

    /// Filter the current raw records; returns how many survived
    pub fn process(&mut self) -> Result<usize> {
        let raw = self.raw.as_deref().ok_or_else(|| {
            Error::PreconditionError("no data fetched yet; fetch before processing".into())
        })?;

        let processed = processor::process(raw);
        let count = processed.len();
        info!("Processed {} of {} records", count, raw.len());

        self.processed = Some(processed);
        Ok(count)
    }

    /// Name search over the processed records
    pub fn search(&self, keyword: &str) -> Result<Vec<&PlanetRecord>> {
        Ok(search::search(self.processed()?, keyword))
    }

    /// Exact (case-insensitive) name lookup over the processed records
    pub fn find(&self, name: &str) -> Result<Option<&PlanetRecord>> {
        Ok(search::find_exact(self.processed()?, name))
    }

    /// Plot series for the processed records
    pub fn project(&self) -> Result<Projection> {
        Ok(projection::project(self.processed()?))
    }

    pub fn processed(&self) -> Result<&[PlanetRecord]> {
        self.processed.as_deref().ok_or_else(|| {
            Error::PreconditionError("no processed data yet; process before searching or plotting".into())
        })
    }

    /// Raw records from the last successful fetch, empty if there was none
    pub fn raw(&self) -> &[RawRecord] {
        self.raw.as_deref().unwrap_or_default()
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MockRecordSource;
    use serde_json::json;

    fn rows(value: serde_json::Value) -> Vec<RawRecord> {
        serde_json::from_value(value).unwrap()
    }

    fn scenario_rows() -> Vec<RawRecord> {
        rows(json!([
            {"pl_name": "Kepler-1b", "pl_orbper": 10.5, "pl_rade": 1.2, "disc_year": 2010},
            {"pl_name": "X", "pl_orbper": null, "pl_rade": 2.0},
            {"pl_name": "TRAPPIST-1e", "pl_orbper": 6.1, "pl_rade": 0.92, "disc_year": 2017}
        ]))
    }

    fn source_returning(records: Vec<RawRecord>) -> MockRecordSource {
        let mut source = MockRecordSource::new();
        source
            .expect_fetch_records()
            .returning(move || Ok(records.clone()));
        source.expect_describe().return_const("mock".to_string());
        source
    }

    fn failing_source() -> MockRecordSource {
        let mut source = MockRecordSource::new();
        source.expect_fetch_records().returning(|| {
            Err(Error::NetworkError(
                "Archive returned status 500 Internal Server Error: ".into(),
            ))
        });
        source.expect_describe().return_const("mock".to_string());
        source
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = Session::new();
        assert_eq!(session.state(), SessionState::Empty);
        assert!(session.raw().is_empty());
        assert!(session.fetched_at().is_none());
    }

    #[test]
    fn test_process_before_fetch_is_precondition_error() {
        let mut session = Session::new();
        assert!(matches!(session.process(), Err(Error::PreconditionError(_))));
        assert_eq!(session.state(), SessionState::Empty);
    }

    #[tokio::test]
    async fn test_search_and_project_before_process_are_precondition_errors() {
        let mut session = Session::new();
        assert!(matches!(session.search("kepler"), Err(Error::PreconditionError(_))));
        assert!(matches!(session.project(), Err(Error::PreconditionError(_))));

        session.fetch(&source_returning(scenario_rows())).await.unwrap();
        assert!(matches!(session.search("kepler"), Err(Error::PreconditionError(_))));
        assert!(matches!(session.project(), Err(Error::PreconditionError(_))));
        assert!(matches!(session.find("Kepler-1b"), Err(Error::PreconditionError(_))));
    }

    #[tokio::test]
    async fn test_full_pipeline() {
        let mut session = Session::new();

        let fetched = session.fetch(&source_returning(scenario_rows())).await.unwrap();
        assert_eq!(fetched, 3);
        assert_eq!(session.state(), SessionState::Fetched);
        assert!(session.fetched_at().is_some());

        let processed = session.process().unwrap();
        assert_eq!(processed, 2);
        assert_eq!(session.state(), SessionState::Processed);

        let matches = session.search("kepler").unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "Kepler-1b");

        assert!(session.search("").unwrap().is_empty());
        assert_eq!(session.find("trappist-1E").unwrap().unwrap().discovery_year, Some(2017));

        let projection = session.project().unwrap();
        assert_eq!(projection.xs, vec![10.5, 6.1]);
        assert_eq!(projection.ys, vec![1.2, 0.92]);
    }

    #[tokio::test]
    async fn test_failed_fetch_on_empty_session_stays_empty() {
        let mut session = Session::new();

        let err = session.fetch(&failing_source()).await.unwrap_err();
        assert!(matches!(err, Error::NetworkError(_)));
        assert_eq!(session.state(), SessionState::Empty);
        assert!(session.raw().is_empty());
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_prior_state() {
        let mut session = Session::new();
        session.fetch(&source_returning(scenario_rows())).await.unwrap();
        session.process().unwrap();
        let fetched_at = session.fetched_at();

        assert!(session.fetch(&failing_source()).await.is_err());

        assert_eq!(session.state(), SessionState::Processed);
        assert_eq!(session.raw().len(), 3);
        assert_eq!(session.processed().unwrap().len(), 2);
        assert_eq!(session.fetched_at(), fetched_at);
    }

    #[tokio::test]
    async fn test_refetch_discards_processed_records() {
        let mut session = Session::new();
        session.fetch(&source_returning(scenario_rows())).await.unwrap();
        session.process().unwrap();

        let smaller = rows(json!([{"pl_name": "Gliese 581 c", "pl_orbper": 12.9, "pl_rade": 1.5}]));
        session.fetch(&source_returning(smaller)).await.unwrap();

        assert_eq!(session.state(), SessionState::Fetched);
        assert!(session.search("kepler").is_err());

        session.process().unwrap();
        assert!(session.search("kepler").unwrap().is_empty());
        assert_eq!(session.search("gliese").unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_fetched_but_all_invalid_is_distinct_from_never_fetched() {
        let mut session = Session::new();
        let invalid = rows(json!([{"pl_name": "X", "pl_orbper": null, "pl_rade": 2.0}]));
        session.fetch(&source_returning(invalid)).await.unwrap();

        assert_eq!(session.process().unwrap(), 0);
        assert_eq!(session.state(), SessionState::Processed);
        assert!(session.project().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reprocessing_is_allowed() {
        let mut session = Session::new();
        session.fetch(&source_returning(scenario_rows())).await.unwrap();
        assert_eq!(session.process().unwrap(), 2);
        assert_eq!(session.process().unwrap(), 2);
        assert_eq!(session.state(), SessionState::Processed);
    }
}
