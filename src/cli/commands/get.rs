//! `cachette <file> <key>` — print the value of the best match, or every
//! match with `-a`.

use std::io::{self, Write};

use crate::cli::output;
use crate::cli::{open_store, Cli};
use crate::config::Settings;
use crate::errors::Result;

/// Execute the show action.
///
/// The value is written without a trailing newline so it can be piped
/// straight into another program.
pub fn execute(cli: &Cli, settings: &Settings, key: &str) -> Result<()> {
    let store = open_store(cli, settings)?;
    let entry = store.retrieve(key, cli.exact)?;

    if let Some(value) = entry.value {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{value}")?;
        stdout.flush()?;
    }

    Ok(())
}

/// Execute the show-all action.
pub fn execute_all(cli: &Cli, settings: &Settings, key: &str) -> Result<()> {
    let store = open_store(cli, settings)?;
    let mut matches = store.retrieve_all(key)?.peekable();

    if matches.peek().is_none() {
        output::info(&format!("No key matches '{key}'."));
        return Ok(());
    }

    output::print_entries(matches, &cli.render_options(settings));
    Ok(())
}
