//! Package container access for the otaplan OTA update planner
//!
//! A planning pass reads firmware blobs and metadata out of a target-files
//! package and stages blob copies into an output package. This crate
//! provides the capability traits the planner works against, plus the two
//! concrete containers used in practice:
//!
//! - [`ZipPackage`] / [`ZipPackageWriter`]: zip archives, the on-disk
//!   format of target-files and OTA packages
//! - [`MemPackage`]: an in-memory container for tests and tooling
//!
//! Readers never mutate a package; writers are append-only.

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod archive;
pub mod error;
pub mod memory;

pub use archive::{ZipPackage, ZipPackageWriter};
pub use error::PackageError;
pub use memory::MemPackage;

/// A specialized `Result` type for package operations.
pub type Result<T> = std::result::Result<T, PackageError>;

/// Read-only access to the entries of a package.
///
/// Entry names use `/`-separated archive paths (`RADIO/boot.img`). An
/// absent entry is reported as [`PackageError::EntryNotFound`], which
/// callers may treat as a defined state for optional resources; every
/// other error is an unexpected container failure.
pub trait PackageRead {
    /// Identity of this package for diagnostics (typically its file name).
    fn name(&self) -> &str;

    /// List every entry path in the package.
    ///
    /// # Errors
    ///
    /// Returns an error if the container cannot be enumerated.
    fn entries(&mut self) -> Result<Vec<String>>;

    /// Read the full contents of one entry.
    ///
    /// # Errors
    ///
    /// Returns [`PackageError::EntryNotFound`] for an absent entry, or
    /// another [`PackageError`] for container and I/O failures.
    fn read(&mut self, entry: &str) -> Result<Vec<u8>>;
}

/// Append-only write access to an output package.
pub trait PackageWrite {
    /// Identity of this package for diagnostics.
    fn name(&self) -> &str;

    /// Add one entry with the given contents.
    ///
    /// Existing entries are never rewritten; staging the same entry twice
    /// is a [`PackageError::DuplicateEntry`].
    ///
    /// # Errors
    ///
    /// Returns an error if the entry already exists or the container
    /// rejects the write.
    fn write(&mut self, entry: &str, data: &[u8]) -> Result<()>;
}
