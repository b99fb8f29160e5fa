//! `cachette -d <key> <file>` and `cachette -D <regex> <file>` — remove entries.

use crate::cli::output;
use crate::cli::{open_store, Cli};
use crate::config::Settings;
use crate::errors::Result;

/// Execute `-d`: delete one exact key.
pub fn execute(cli: &Cli, settings: &Settings, key: &str) -> Result<()> {
    let store = open_store(cli, settings)?;
    store.delete(key)?;

    output::success(&format!("Deleted '{key}'"));
    Ok(())
}

/// Execute `-D`: delete every key the regex matches.
pub fn execute_matching(cli: &Cli, settings: &Settings, key_re: &str) -> Result<()> {
    let store = open_store(cli, settings)?;
    let removed = store.delete_matching(key_re)?;

    output::success(&format!("Deleted {removed} key(s) matching '{key_re}'"));
    Ok(())
}
