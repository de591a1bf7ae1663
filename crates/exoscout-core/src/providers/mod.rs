// Record sources: the live archive and saved responses on disk
pub mod archive;
pub mod file;

pub use archive::ArchiveSource;
pub use file::FileSource;
