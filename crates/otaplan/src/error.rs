//! Error types for update planning

use otaplan_package::PackageError;
use thiserror::Error;

/// Errors that abort a planning pass
#[derive(Debug, Error)]
pub enum PlanError {
    /// A filesmap data line with a field count other than 2 or 3.
    ///
    /// Partial manifests are never partially trusted; one malformed line
    /// fails the whole pass.
    #[error("malformed filesmap line in `{package}`: \"{line}\"")]
    MalformedManifestLine {
        /// Package the manifest was read from
        package: String,
        /// The offending line, verbatim
        line: String,
    },

    /// Unexpected failure reading or writing a package
    #[error(transparent)]
    Package(#[from] PackageError),
}
