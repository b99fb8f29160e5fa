//! Key matching.
//!
//! Fuzzy lookups turn a query into a subsequence pattern: the raw
//! characters of the query are joined with `.*`, so `"ky1"` becomes
//! `k.*y.*1`.  Characters are not escaped, so `.` stays a wildcard and a
//! query such as `"("` is an `InvalidPattern`.  Both fuzzy and raw
//! patterns use search semantics (a match may start anywhere in the key).

use regex::Regex;

use crate::errors::{CachetteError, Result};

/// Build the fuzzy pattern source for `query`.
pub fn fuzzy_pattern(query: &str) -> String {
    query
        .chars()
        .map(String::from)
        .collect::<Vec<_>>()
        .join(".*")
}

/// Compile the fuzzy pattern for `query`.
pub fn fuzzy_regex(query: &str) -> Result<Regex> {
    compile(&fuzzy_pattern(query))
}

/// Compile a caller-supplied key regex as-is.
pub fn key_regex(pattern: &str) -> Result<Regex> {
    compile(pattern)
}

fn compile(source: &str) -> Result<Regex> {
    Regex::new(source).map_err(|e| CachetteError::InvalidPattern(e.to_string()))
}
