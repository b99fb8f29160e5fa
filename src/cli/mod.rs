//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod crypt;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{CachetteError, Result};
use crate::vault::{Cachette, WriteMode};

/// Environment variable consulted when `-p` is not given.
pub const PASSWORD_ENV: &str = "CACHETTE_PASSWORD";

/// Cachette CLI: a password-protected key-value store.
#[derive(Parser)]
#[command(
    name = "cachette",
    about = "Password-protected key-value store kept in a single encrypted file",
    version
)]
pub struct Cli {
    /// Encrypted cache file (created on first use)
    pub cache_file: PathBuf,

    /// Key to look up (fuzzy unless -e) or to set
    pub key: Option<String>,

    /// Value to store under KEY
    pub value: Option<String>,

    /// Show all matched data
    #[arg(short = 'a')]
    pub all_matched: bool,

    /// Comment to store with the value
    #[arg(short = 'c', value_name = "COMMENT")]
    pub comment: Option<String>,

    /// Delete data mapped by the key
    #[arg(short = 'd', value_name = "KEY")]
    pub del_key: Option<String>,

    /// Delete data mapped by the key regex
    #[arg(short = 'D', value_name = "REGEX")]
    pub del_key_re: Option<String>,

    /// Exact key match
    #[arg(short = 'e')]
    pub exact: bool,

    /// Only show keys
    #[arg(short = 'k')]
    pub key_only: bool,

    /// Password (default: $CACHETTE_PASSWORD, then an interactive prompt)
    #[arg(short = 'p', value_name = "PASSWORD")]
    pub password: Option<String>,

    /// Stylize output
    #[arg(short = 'S')]
    pub style: bool,

    /// Rewrite the cache through a temp file and rename
    #[arg(long)]
    pub atomic: bool,
}

/// What a given command line asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum Action<'a> {
    /// `-d KEY`
    Delete(&'a str),
    /// `-D REGEX`
    DeleteMatching(&'a str),
    /// `-k`
    ListKeys,
    /// No key and no flags.
    List,
    /// `KEY`
    Show(&'a str),
    /// `-a KEY`
    ShowAll(&'a str),
    /// `KEY VALUE`
    Set { key: &'a str, value: &'a str },
}

impl Cli {
    /// Decide what to do from the positional arguments and flags.
    ///
    /// Delete and list flags only apply when no key is given.
    pub fn action(&self) -> Action<'_> {
        match (self.key.as_deref(), self.value.as_deref()) {
            (Some(key), Some(value)) => Action::Set { key, value },
            (Some(key), None) if self.all_matched => Action::ShowAll(key),
            (Some(key), None) => Action::Show(key),
            (None, _) => {
                if let Some(key) = self.del_key.as_deref() {
                    Action::Delete(key)
                } else if let Some(re) = self.del_key_re.as_deref() {
                    Action::DeleteMatching(re)
                } else if self.key_only {
                    Action::ListKeys
                } else {
                    Action::List
                }
            }
        }
    }

    /// Write backend: `--atomic` wins over the config file.
    pub fn write_mode(&self, settings: &Settings) -> WriteMode {
        if self.atomic {
            WriteMode::Atomic
        } else {
            settings.write_mode
        }
    }

    /// Rendering options: `-S` wins over the config file.
    pub fn render_options(&self, settings: &Settings) -> output::RenderOptions {
        output::RenderOptions {
            style: self.style || settings.style,
            key_width: settings.key_width,
        }
    }
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Get the password, trying in order:
/// 1. `flag` (the `-p` value on the command line)
/// 2. `CACHETTE_PASSWORD` env var
/// 3. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password(flag: Option<&str>) -> Result<Zeroizing<String>> {
    if let Some(pw) = flag.filter(|pw| !pw.is_empty()) {
        return Ok(Zeroizing::new(pw.to_string()));
    }

    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("password")
        .allow_empty_password(true)
        .interact()
        .map_err(|e| CachetteError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Acquire the password and open the cache file named on the command line.
pub fn open_store(cli: &Cli, settings: &Settings) -> Result<Cachette> {
    let password = prompt_password(cli.password.as_deref())?;
    Cachette::open_with(
        &cli.cache_file,
        password.as_bytes(),
        cli.write_mode(settings),
    )
}
