//! Error types for package container access

use thiserror::Error;

/// Errors raised by package readers and writers
#[derive(Debug, Error)]
pub enum PackageError {
    /// Entry absent from the package; a defined state for optional resources
    #[error("entry `{entry}` not found in package `{package}`")]
    EntryNotFound {
        /// Package identity
        package: String,
        /// Entry path that was requested
        entry: String,
    },

    /// Entry staged twice into an append-only output package
    #[error("entry `{entry}` already staged in package `{package}`")]
    DuplicateEntry {
        /// Package identity
        package: String,
        /// Entry path that was written twice
        entry: String,
    },

    /// Underlying I/O failure
    #[error("I/O failure in package `{package}`: {source}")]
    Io {
        /// Package identity
        package: String,
        /// Operating-system error
        #[source]
        source: std::io::Error,
    },

    /// Malformed or unreadable archive container
    #[error("archive failure in package `{package}`: {source}")]
    Archive {
        /// Package identity
        package: String,
        /// Error reported by the archive layer
        #[source]
        source: zip::result::ZipError,
    },
}

impl PackageError {
    /// True for the defined-absent case, as opposed to a container failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PackageError::EntryNotFound { .. })
    }
}
