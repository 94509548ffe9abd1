//! In-memory package container
//!
//! Backs planner tests and tooling that assemble a package without
//! touching disk. Implements both capability traits; the write side keeps
//! the same append-only policy as the zip writer.

use std::collections::BTreeMap;

use crate::error::PackageError;
use crate::{PackageRead, PackageWrite, Result};

/// Package held entirely in memory
#[derive(Debug, Default, Clone)]
pub struct MemPackage {
    name: String,
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemPackage {
    /// Create an empty package with the given identity.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Add an entry, replacing any previous contents. Builder-style, for
    /// assembling fixtures.
    #[must_use]
    pub fn with_entry(mut self, entry: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.entries.insert(entry.into(), data.into());
        self
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the package holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Contents of one entry, if present.
    pub fn get(&self, entry: &str) -> Option<&[u8]> {
        self.entries.get(entry).map(Vec::as_slice)
    }
}

impl PackageRead for MemPackage {
    fn name(&self) -> &str {
        &self.name
    }

    fn entries(&mut self) -> Result<Vec<String>> {
        Ok(self.entries.keys().cloned().collect())
    }

    fn read(&mut self, entry: &str) -> Result<Vec<u8>> {
        self.entries
            .get(entry)
            .cloned()
            .ok_or_else(|| PackageError::EntryNotFound {
                package: self.name.clone(),
                entry: entry.to_owned(),
            })
    }
}

impl PackageWrite for MemPackage {
    fn name(&self) -> &str {
        &self.name
    }

    fn write(&mut self, entry: &str, data: &[u8]) -> Result<()> {
        if self.entries.contains_key(entry) {
            return Err(PackageError::DuplicateEntry {
                package: self.name.clone(),
                entry: entry.to_owned(),
            });
        }
        self.entries.insert(entry.to_owned(), data.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_back_entry() -> Result<()> {
        let mut package = MemPackage::new("target").with_entry("RADIO/rpm.mbn", b"rpm".to_vec());
        assert_eq!(package.read("RADIO/rpm.mbn")?, b"rpm");
        assert_eq!(package.entries()?, vec!["RADIO/rpm.mbn".to_owned()]);
        Ok(())
    }

    #[test]
    fn test_absent_entry_is_not_found() {
        let mut package = MemPackage::new("target");
        let result = package.read("RADIO/filesmap");
        assert!(matches!(result, Err(ref e) if e.is_not_found()));
    }

    #[test]
    fn test_write_is_append_only() -> Result<()> {
        let mut package = MemPackage::new("output");
        package.write("boot.img", b"first")?;
        let second = package.write("boot.img", b"second");
        assert!(matches!(second, Err(PackageError::DuplicateEntry { .. })));
        assert_eq!(package.get("boot.img"), Some(&b"first"[..]));
        Ok(())
    }
}
