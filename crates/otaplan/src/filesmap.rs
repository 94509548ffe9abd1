//! Filesmap loading and radio-blob discovery
//!
//! The filesmap is the manifest tying each radio blob to its target
//! partition. Fingerprints are always recomputed from the bytes stored in
//! the package being loaded; a fingerprint column in the manifest is
//! ignored rather than trusted.

use std::collections::{BTreeMap, BTreeSet};

use otaplan_package::{PackageError, PackageRead};
use serde::Serialize;
use tracing::warn;

use crate::Result;
use crate::error::PlanError;
use crate::fingerprint::content_fingerprint;

/// Package-internal directory holding all radio blobs and the manifest
pub const RADIO_DIR: &str = "RADIO/";

/// Manifest entry path inside the package
pub const FILESMAP_ENTRY: &str = "RADIO/filesmap";

/// One manifest entry: a radio blob, its target partition, and the
/// fingerprint and length computed from the packaged bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileMapEntry {
    /// Blob file name relative to the radio directory
    pub file_name: String,

    /// Target partition device path
    pub partition_path: String,

    /// Lowercase-hex SHA-1 of the packaged blob bytes
    pub fingerprint: String,

    /// Length of the packaged blob in bytes
    pub byte_length: u64,
}

/// Mapping from blob file name to its manifest entry.
///
/// An empty map is a valid state meaning "no packaged firmware"; it is
/// distinct from a malformed manifest, which fails loading outright.
#[derive(Debug, Default, Clone, Serialize)]
pub struct FilesMap(BTreeMap<String, FileMapEntry>);

impl FilesMap {
    /// Entry for a blob name, if the manifest covers it.
    pub fn get(&self, file_name: &str) -> Option<&FileMapEntry> {
        self.0.get(file_name)
    }

    /// True when the manifest covers this blob name.
    pub fn contains(&self, file_name: &str) -> bool {
        self.0.contains_key(file_name)
    }

    /// Number of mapped blobs.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no firmware is mapped.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate entries in blob-name order.
    pub fn iter(&self) -> impl Iterator<Item = &FileMapEntry> {
        self.0.values()
    }

    fn insert(&mut self, entry: FileMapEntry) {
        self.0.insert(entry.file_name.clone(), entry);
    }
}

/// Load and verify the filesmap of a package.
///
/// An absent manifest is a defined empty state (reported as a warning,
/// not an error). Data lines must carry 2 or 3 whitespace-separated
/// fields: `name partition [fingerprint]`. The third field is ignored;
/// length and fingerprint always come from the packaged blob itself.
///
/// # Errors
///
/// Returns [`PlanError::MalformedManifestLine`] for any other field
/// count, or a package error if a mapped blob cannot be read.
pub fn load_filesmap(package: &mut dyn PackageRead) -> Result<FilesMap> {
    let package_name = package.name().to_owned();
    let data = match package.read(FILESMAP_ENTRY) {
        Ok(data) => data,
        Err(PackageError::EntryNotFound { .. }) => {
            warn!(package = %package_name, "could not find RADIO/filesmap; no packaged firmware");
            return Ok(FilesMap::default());
        }
        Err(e) => return Err(e.into()),
    };

    let text = String::from_utf8_lossy(&data);
    let mut map = FilesMap::default();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        let (file_name, partition_path) = match fields.as_slice() {
            [name, partition] | [name, partition, _] => (*name, *partition),
            _ => {
                return Err(PlanError::MalformedManifestLine {
                    package: package_name,
                    line: line.to_owned(),
                });
            }
        };

        let blob = package.read(&format!("{RADIO_DIR}{file_name}"))?;
        map.insert(FileMapEntry {
            file_name: file_name.to_owned(),
            partition_path: partition_path.to_owned(),
            fingerprint: content_fingerprint(&blob),
            byte_length: blob.len() as u64,
        });
    }
    Ok(map)
}

/// Discover every radio blob packaged under [`RADIO_DIR`].
///
/// Returns full entry paths, directory prefix included; the directory
/// marker itself is excluded. An empty set is valid and means nothing is
/// packaged for flashing.
///
/// # Errors
///
/// Returns an error if the package cannot be enumerated.
pub fn radio_files(package: &mut dyn PackageRead) -> Result<BTreeSet<String>> {
    Ok(package
        .entries()?
        .into_iter()
        .filter(|path| path.starts_with(RADIO_DIR) && path.len() > RADIO_DIR.len())
        .collect())
}
