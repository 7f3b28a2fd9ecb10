//! Directory ingestor for newspaper title metadata
//!
//! Reads a directory of MODS XML files and, for each file, clones a
//! newspaper template object in the DOMS repository, attaches the file
//! content as a datastream, links the created objects into a chain in
//! file-name order and publishes them.
//!
//! The remote repository is reached through the narrow [`Repository`]
//! trait, implemented for [`doms_client::DomsClient`].

pub mod discover;
pub mod ingestor;
pub mod repository;
pub mod transcode;

// Re-exports
pub use discover::{discover_files, has_suffix, XML_SUFFIX};
pub use ingestor::{
    DirectoryIngestor, LOG_MESSAGE, NEWSPAPER_DATASTREAM, NEWSPAPER_RELATION, NEWSPAPER_TEMPLATE,
};
pub use repository::Repository;
pub use transcode::transcode;

use doms_client::DomsError;

/// Error types for ingestion operations
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("repository error: {0}")]
    Backend(#[from] DomsError),
}

pub type Result<T> = std::result::Result<T, IngestError>;
