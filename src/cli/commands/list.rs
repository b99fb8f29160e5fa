//! `cachette <file>` — print every entry, or only the keys with `-k`.

use crate::cli::output;
use crate::cli::{open_store, Cli};
use crate::config::Settings;
use crate::errors::Result;

/// Execute the list action.
pub fn execute(cli: &Cli, settings: &Settings, keys_only: bool) -> Result<()> {
    let store = open_store(cli, settings)?;
    let document = store.list_all()?;

    if keys_only {
        for key in document.keys() {
            println!("{key}");
        }
    } else {
        output::print_entries(document, &cli.render_options(settings));
    }

    Ok(())
}
