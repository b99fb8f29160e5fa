//! Whole-file storage backends.
//!
//! The store always reads and writes the complete ciphertext in one go.
//! How the write reaches disk is pluggable:
//!
//! - `InPlaceFile` truncates the existing file and overwrites it.  A crash
//!   mid-write leaves a truncated, unreadable cache.
//! - `AtomicFile` writes a sibling temp file and renames it over the
//!   target, so readers only ever see the old or the new content.
//!
//! Neither backend locks the file.  Two processes mutating the same cache
//! race and the last writer wins.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Files smaller than this are treated as uninitialized.
const MIN_FILE_LEN: u64 = 2;

/// Read-everything / write-everything access to one cache file.
pub trait StorageFile {
    /// Path of the backing file.
    fn path(&self) -> &Path;

    /// Write the complete new contents of the file.
    fn write(&self, contents: &[u8]) -> Result<()>;

    /// Read the complete contents of the file.
    fn read(&self) -> Result<Vec<u8>> {
        Ok(fs::read(self.path())?)
    }

    /// `true` when the file is missing or too small to hold a document.
    fn needs_init(&self) -> Result<bool> {
        match fs::metadata(self.path()) {
            Ok(meta) => Ok(!meta.is_file() || meta.len() < MIN_FILE_LEN),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(true),
            Err(e) => Err(e.into()),
        }
    }
}

/// Truncate-and-overwrite backend.
#[derive(Debug, Clone)]
pub struct InPlaceFile {
    path: PathBuf,
}

impl InPlaceFile {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl StorageFile for InPlaceFile {
    fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, contents: &[u8]) -> Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)?;
        file.write_all(contents)?;
        file.flush()?;
        Ok(())
    }
}

/// Temp-file-plus-rename backend.
#[derive(Debug, Clone)]
pub struct AtomicFile {
    path: PathBuf,
}

impl AtomicFile {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// `.<name>.tmp` next to the target, so the rename stays on one filesystem.
    fn tmp_path(&self) -> PathBuf {
        let parent = self.path.parent().unwrap_or(Path::new("."));
        parent.join(format!(
            ".{}.tmp",
            self.path.file_name().unwrap_or_default().to_string_lossy()
        ))
    }
}

impl StorageFile for AtomicFile {
    fn path(&self) -> &Path {
        &self.path
    }

    /// The replacement inherits the existing file's permissions.
    fn write(&self, contents: &[u8]) -> Result<()> {
        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, contents)?;
        if let Ok(existing) = fs::metadata(&self.path) {
            fs::set_permissions(&tmp_path, existing.permissions())?;
        }
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

/// Which backend a store writes through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WriteMode {
    /// Truncate and overwrite the existing file.
    #[default]
    InPlace,
    /// Write a temp file and rename it over the target.
    Atomic,
}

impl WriteMode {
    /// Build the backend for `path`.
    pub fn storage(self, path: &Path) -> Box<dyn StorageFile> {
        match self {
            WriteMode::InPlace => Box::new(InPlaceFile::new(path)),
            WriteMode::Atomic => Box::new(AtomicFile::new(path)),
        }
    }
}
