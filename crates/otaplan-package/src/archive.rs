//! Zip-backed package containers
//!
//! Target-files and OTA packages are zip archives. [`ZipPackage`] wraps an
//! archive for reading; [`ZipPackageWriter`] stages entries into a new
//! archive. Staged firmware blobs are stored uncompressed so the installer
//! runtime can extract them without inflating.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{Read, Seek, Write};
use std::path::Path;

use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::PackageError;
use crate::{PackageRead, PackageWrite, Result};

fn container_error(package: &str, entry: Option<&str>, source: ZipError) -> PackageError {
    match source {
        ZipError::FileNotFound => PackageError::EntryNotFound {
            package: package.to_owned(),
            entry: entry.unwrap_or_default().to_owned(),
        },
        ZipError::Io(source) => PackageError::Io {
            package: package.to_owned(),
            source,
        },
        source => PackageError::Archive {
            package: package.to_owned(),
            source,
        },
    }
}

/// Read-only zip package
pub struct ZipPackage<R: Read + Seek> {
    name: String,
    archive: ZipArchive<R>,
}

impl ZipPackage<File> {
    /// Open a zip package from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or is not a readable
    /// zip archive.
    pub fn open(path: &Path) -> Result<Self> {
        let name = path.display().to_string();
        let file = File::open(path).map_err(|source| PackageError::Io {
            package: name.clone(),
            source,
        })?;
        Self::new(name, file)
    }
}

impl<R: Read + Seek> ZipPackage<R> {
    /// Wrap an already-open reader as a package.
    ///
    /// # Errors
    ///
    /// Returns an error if the reader does not contain a valid archive.
    pub fn new(name: impl Into<String>, reader: R) -> Result<Self> {
        let name = name.into();
        let archive =
            ZipArchive::new(reader).map_err(|e| container_error(&name, None, e))?;
        Ok(Self { name, archive })
    }
}

impl<R: Read + Seek> PackageRead for ZipPackage<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn entries(&mut self) -> Result<Vec<String>> {
        Ok(self.archive.file_names().map(str::to_owned).collect())
    }

    fn read(&mut self, entry: &str) -> Result<Vec<u8>> {
        let mut file = self
            .archive
            .by_name(entry)
            .map_err(|e| container_error(&self.name, Some(entry), e))?;
        let mut data = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut data)
            .map_err(|source| PackageError::Io {
                package: self.name.clone(),
                source,
            })?;
        Ok(data)
    }
}

/// Append-only zip package writer
pub struct ZipPackageWriter<W: Write + Seek> {
    name: String,
    writer: ZipWriter<W>,
    staged: BTreeSet<String>,
}

impl ZipPackageWriter<File> {
    /// Create a new zip package on disk, truncating any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    pub fn create(path: &Path) -> Result<Self> {
        let name = path.display().to_string();
        let file = File::create(path).map_err(|source| PackageError::Io {
            package: name.clone(),
            source,
        })?;
        Ok(Self::new(name, file))
    }
}

impl<W: Write + Seek> ZipPackageWriter<W> {
    /// Wrap a writer as a new, empty package.
    pub fn new(name: impl Into<String>, inner: W) -> Self {
        Self {
            name: name.into(),
            writer: ZipWriter::new(inner),
            staged: BTreeSet::new(),
        }
    }

    /// Finalize the archive and return the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the central directory cannot be written.
    pub fn finish(self) -> Result<W> {
        self.writer
            .finish()
            .map_err(|e| container_error(&self.name, None, e))
    }
}

impl<W: Write + Seek> PackageWrite for ZipPackageWriter<W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn write(&mut self, entry: &str, data: &[u8]) -> Result<()> {
        if !self.staged.insert(entry.to_owned()) {
            return Err(PackageError::DuplicateEntry {
                package: self.name.clone(),
                entry: entry.to_owned(),
            });
        }
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        self.writer
            .start_file(entry, options)
            .map_err(|e| container_error(&self.name, Some(entry), e))?;
        self.writer
            .write_all(data)
            .map_err(|source| PackageError::Io {
                package: self.name.clone(),
                source,
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn build_archive(entries: &[(&str, &[u8])]) -> Result<Cursor<Vec<u8>>> {
        let mut writer = ZipPackageWriter::new("test.zip", Cursor::new(Vec::new()));
        for (entry, data) in entries {
            writer.write(entry, data)?;
        }
        writer.finish()
    }

    #[test]
    fn test_roundtrip_entries_and_bytes() -> Result<()> {
        let cursor = build_archive(&[
            ("RADIO/filesmap", b"boot.img /dev/block/boot"),
            ("RADIO/boot.img", b"\x00\x01\x02\x03"),
        ])?;

        let mut package = ZipPackage::new("test.zip", cursor)?;
        let mut entries = package.entries()?;
        entries.sort();
        assert_eq!(entries, vec!["RADIO/boot.img", "RADIO/filesmap"]);
        assert_eq!(package.read("RADIO/boot.img")?, b"\x00\x01\x02\x03");
        Ok(())
    }

    #[test]
    fn test_missing_entry_is_not_found() -> Result<()> {
        let cursor = build_archive(&[("RADIO/boot.img", b"abc")])?;
        let mut package = ZipPackage::new("test.zip", cursor)?;

        let result = package.read("RADIO/filesmap");
        assert!(
            matches!(result, Err(ref e) if e.is_not_found()),
            "expected EntryNotFound"
        );
        Ok(())
    }

    #[test]
    fn test_duplicate_staging_rejected() {
        let mut writer = ZipPackageWriter::new("out.zip", Cursor::new(Vec::new()));
        assert!(writer.write("boot.img", b"a").is_ok());
        let err = writer.write("boot.img", b"b");
        assert!(matches!(err, Err(PackageError::DuplicateEntry { .. })));
    }

    #[test]
    fn test_open_and_create_on_disk() -> Result<()> {
        let dir = tempfile::tempdir().map_err(|source| PackageError::Io {
            package: "tempdir".to_owned(),
            source,
        })?;
        let path = dir.path().join("package.zip");

        let mut writer = ZipPackageWriter::create(&path)?;
        writer.write("RADIO/sbl1.mbn", b"bootloader bytes")?;
        writer.finish()?;

        let mut package = ZipPackage::open(&path)?;
        assert_eq!(package.read("RADIO/sbl1.mbn")?, b"bootloader bytes");
        Ok(())
    }
}
