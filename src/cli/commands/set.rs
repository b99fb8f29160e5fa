//! `cachette <file> <key> <value>` — add or update an entry.

use crate::cli::{open_store, Cli};
use crate::config::Settings;
use crate::errors::Result;

/// Execute the set action, storing `-c` as the comment.
pub fn execute(cli: &Cli, settings: &Settings, key: &str, value: &str) -> Result<()> {
    let store = open_store(cli, settings)?;
    store.update(key, Some(value), cli.comment.as_deref())
}
