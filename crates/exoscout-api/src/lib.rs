// API client for the NASA Exoplanet Archive TAP service
pub mod archive;
pub mod retry;

// Re-export common types
pub use archive::{ArchiveClient, ArchiveError, ArchiveRow, TapQuery};
pub use retry::RetryConfig;
