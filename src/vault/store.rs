//! High-level cache operations used by the CLI.
//!
//! `Cachette` keeps no document in memory between calls.  Every
//! operation reads the whole file, decrypts it, decodes the JSON and,
//! for mutations, encodes, encrypts and writes the whole file back.
//! A failure anywhere before the final write leaves the file untouched.

use std::path::Path;

use log::{debug, info};
use zeroize::Zeroizing;

use crate::crypto::encryption::{decrypt, encrypt};
use crate::errors::{CachetteError, Result};

use super::entry::{Document, Entry};
use super::pattern;
use super::storage::{StorageFile, WriteMode};

/// Handle to one encrypted cache file.  Create one with `Cachette::open`.
pub struct Cachette {
    /// Backend that reads and writes the whole file.
    file: Box<dyn StorageFile>,

    /// The session password (zeroized on drop).  Never written anywhere.
    password: Zeroizing<Vec<u8>>,
}

impl Cachette {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Open the cache at `path`, writing in place.
    ///
    /// A missing or near-empty file is initialized with an empty
    /// document.  An existing file is left alone and the password is
    /// not checked: a wrong password only shows up on the first read.
    pub fn open(path: &Path, password: &[u8]) -> Result<Self> {
        Self::open_with(path, password, WriteMode::default())
    }

    /// Open the cache at `path` with an explicit write backend.
    pub fn open_with(path: &Path, password: &[u8], mode: WriteMode) -> Result<Self> {
        debug!("opening {} ({mode:?} writes)", path.display());
        Self::from_storage(mode.storage(path), password)
    }

    /// Open a cache over any storage backend.
    pub fn from_storage(file: Box<dyn StorageFile>, password: &[u8]) -> Result<Self> {
        let store = Self {
            file,
            password: Zeroizing::new(password.to_vec()),
        };

        if store.file.needs_init()? {
            info!("initializing empty cache at {}", store.path().display());
            store.save(&Document::new())?;
        }

        Ok(store)
    }

    // ------------------------------------------------------------------
    // Read operations
    // ------------------------------------------------------------------

    /// Return every entry, sorted by key.
    pub fn list_all(&self) -> Result<Document> {
        let document = self.load()?;
        debug!("listed {} entries", document.len());
        Ok(document)
    }

    /// Look up one entry.
    ///
    /// With `exact` the key must be present as-is.  Otherwise the first
    /// key in sorted order that fuzzily matches `key` wins.
    pub fn retrieve(&self, key: &str, exact: bool) -> Result<Entry> {
        if exact {
            let mut document = self.load()?;
            return document
                .remove(key)
                .ok_or_else(|| CachetteError::KeyNotFound(key.to_string()));
        }

        let matcher = pattern::fuzzy_regex(key)?;
        let document = self.load()?;
        let found = document
            .into_iter()
            .find(|(candidate, _)| matcher.is_match(candidate));

        match found {
            Some((candidate, entry)) => {
                debug!("fuzzy key {key:?} matched {candidate:?}");
                Ok(entry)
            }
            None => Err(CachetteError::KeyNotFound(format!("{key}(fuzzy)"))),
        }
    }

    /// Lazily yield every entry whose key fuzzily matches `key`, in
    /// sorted key order.
    ///
    /// The file is decrypted once, up front.  No match is an empty
    /// iterator, not an error.
    pub fn retrieve_all(&self, key: &str) -> Result<impl Iterator<Item = (String, Entry)>> {
        let matcher = pattern::fuzzy_regex(key)?;
        let document = self.load()?;
        debug!("matching {key:?} against {} keys", document.len());
        Ok(document
            .into_iter()
            .filter(move |(candidate, _)| matcher.is_match(candidate)))
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Insert or overwrite `key`.
    pub fn update(&self, key: &str, value: Option<&str>, comment: Option<&str>) -> Result<()> {
        self.modify(|document| {
            let existed = document
                .insert(key.to_string(), Entry::new(value, comment))
                .is_some();
            debug!(
                "{} key {key:?}",
                if existed { "updated" } else { "added" }
            );
            Ok(())
        })
    }

    /// Remove `key`.  Fails if it is not present.
    pub fn delete(&self, key: &str) -> Result<()> {
        self.modify(|document| {
            if document.remove(key).is_none() {
                return Err(CachetteError::KeyNotFound(key.to_string()));
            }
            debug!("deleted key {key:?}");
            Ok(())
        })
    }

    /// Remove every key that `key_pattern` matches anywhere.
    ///
    /// The pattern is a raw regex, not a fuzzy query.  Fails without
    /// writing if nothing matched.  Returns the number of removed keys.
    pub fn delete_matching(&self, key_pattern: &str) -> Result<usize> {
        let matcher = pattern::key_regex(key_pattern)?;
        let mut removed = 0;

        self.modify(|document| {
            let before = document.len();
            document.retain(|candidate, _| !matcher.is_match(candidate));
            removed = before - document.len();

            if removed == 0 {
                return Err(CachetteError::KeyNotFound(format!("{key_pattern}(regex)")));
            }
            debug!("deleted {removed} key(s) matching {key_pattern:?}");
            Ok(())
        })?;

        Ok(removed)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the path to the cache file.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Read, decrypt and decode the whole document.
    fn load(&self) -> Result<Document> {
        debug!("reading {}", self.path().display());
        let raw = self.file.read()?;
        let plaintext = Zeroizing::new(decrypt(&raw, &self.password)?);
        serde_json::from_slice(&plaintext).map_err(|_| CachetteError::DecodeFailure)
    }

    /// Encode, encrypt and write the whole document.
    fn save(&self, document: &Document) -> Result<()> {
        let plaintext = Zeroizing::new(
            serde_json::to_vec(document)
                .map_err(|e| CachetteError::SerializationError(format!("document: {e}")))?,
        );
        let ciphertext = encrypt(&plaintext, &self.password);
        debug!(
            "writing {} entries to {}",
            document.len(),
            self.path().display()
        );
        self.file.write(ciphertext.as_bytes())
    }

    /// Load, apply `change`, and save only if `change` succeeded.
    fn modify<F>(&self, change: F) -> Result<()>
    where
        F: FnOnce(&mut Document) -> Result<()>,
    {
        let mut document = self.load()?;
        change(&mut document)?;
        self.save(&document)
    }
}
