// Core pipeline: fetch → process → {search, project}
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod processor;
pub mod projection;
pub mod providers;
pub mod search;
pub mod session;
pub mod source;

pub use config::Config;
pub use error::Error;
pub use export::{ExportFormat, Exporter};
pub use models::{PlanetClass, PlanetRecord, RawRecord};
pub use processor::process;
pub use projection::{project, PlotSpec, Projection};
pub use providers::{ArchiveSource, FileSource};
pub use search::{search, SearchIndex};
pub use session::{Session, SessionState};
pub use source::RecordSource;

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
