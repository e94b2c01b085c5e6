//! Error types for export operations
//!
//! Structural failures abort an export and are reported once. Unresolved
//! embed-links and embed cycles are not errors; they travel as
//! [`Notice`](crate::Notice) values and the merge continues.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::constants as C;

/// Result alias for export operations
pub type Result<T> = std::result::Result<T, ExportError>;

#[derive(Debug, Error)]
pub enum ExportError {
    /// No document matches the selected root reference
    #[error("No file found: '{reference}'")]
    NoActiveDocument { reference: String },

    /// Export prefix and suffix are both empty
    #[error("{}", C::ERROR_EXPORT_NAME_UNSET)]
    ConfigurationInvalid,

    /// Writing the final artifact failed
    #[error("Error creating file '{name}': {source}")]
    ArtifactCreationFailed {
        name: String,
        #[source]
        source: io::Error,
    },

    /// Reading a visited document failed
    #[error("Error reading '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Scanning the vault for documents failed
    #[error("Error indexing vault '{}': {source}", .root.display())]
    Index {
        root: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Settings file could not be loaded, saved or edited
    #[error("Settings '{}': {message}", .path.display())]
    Settings { path: PathBuf, message: String },
}

impl From<ExportError> for io::Error {
    fn from(err: ExportError) -> Self {
        let kind = match &err {
            ExportError::NoActiveDocument { .. } => io::ErrorKind::NotFound,
            ExportError::ConfigurationInvalid => io::ErrorKind::InvalidInput,
            ExportError::ArtifactCreationFailed { source, .. }
            | ExportError::Read { source, .. }
            | ExportError::Index { source, .. } => source.kind(),
            ExportError::Settings { .. } => io::ErrorKind::InvalidData,
        };
        io::Error::new(kind, err.to_string())
    }
}
