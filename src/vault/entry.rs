//! Entry and Document types stored inside a cache file.
//!
//! On disk an entry is a two-element JSON array `[value, comment]`
//! where either element may be `null`, so the serde impls go through
//! a plain tuple rather than a struct with named fields.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Wire form of an entry: `[value_or_null, comment_or_null]`.
type RawEntry = (Option<String>, Option<String>);

/// The whole decrypted cache: key -> entry, iterated in sorted key order.
pub type Document = BTreeMap<String, Entry>;

/// A value and an optional comment stored under one key.
///
/// `None` and `Some("")` are distinct states and both survive a round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawEntry", into = "RawEntry")]
pub struct Entry {
    pub value: Option<String>,
    pub comment: Option<String>,
}

impl Entry {
    /// Build an entry from borrowed parts.
    pub fn new(value: Option<&str>, comment: Option<&str>) -> Self {
        Self {
            value: value.map(str::to_string),
            comment: comment.map(str::to_string),
        }
    }
}

impl From<RawEntry> for Entry {
    fn from((value, comment): RawEntry) -> Self {
        Self { value, comment }
    }
}

impl From<Entry> for RawEntry {
    fn from(entry: Entry) -> Self {
        (entry.value, entry.comment)
    }
}
