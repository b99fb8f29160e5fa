//! Vault module — the encrypted document store.
//!
//! This module provides:
//! - `Entry` and `Document` types (`entry`)
//! - Fuzzy and regex key matching (`pattern`)
//! - Whole-file storage backends (`storage`)
//! - High-level `Cachette` store with list/retrieve/update/delete (`store`)

pub mod entry;
pub mod pattern;
pub mod storage;
pub mod store;

// Re-export the most commonly used items.
pub use entry::{Document, Entry};
pub use storage::{AtomicFile, InPlaceFile, StorageFile, WriteMode};
pub use store::Cachette;
