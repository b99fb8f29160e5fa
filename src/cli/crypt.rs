//! `cachette-crypt`: encrypt or decrypt a stream with the cache cipher.
//!
//! Reads `input_file` (or stdin when omitted) and writes the result to
//! stdout with no trailing newline, so the two directions pipe into
//! each other.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::Parser;

use crate::crypto::{decrypt_reader, encrypt_reader};
use crate::errors::Result;

use super::prompt_password;

/// Encrypt or decrypt data with the cachette cipher.
#[derive(Parser)]
#[command(
    name = "cachette-crypt",
    about = "Encrypt or decrypt data with the cachette cipher",
    version
)]
pub struct CryptCli {
    /// File to read (default: stdin)
    pub input_file: Option<PathBuf>,

    /// Decrypt instead of encrypt
    #[arg(short = 'd')]
    pub decrypt: bool,

    /// Password (default: $CACHETTE_PASSWORD, then an interactive prompt)
    #[arg(short = 'p', value_name = "PASSWORD")]
    pub password: Option<String>,
}

/// Encrypt `input` to base64 text, or decrypt base64 text back to bytes.
pub fn transform<R: Read>(input: R, password: &[u8], decrypt: bool) -> Result<Vec<u8>> {
    if decrypt {
        decrypt_reader(input, password)
    } else {
        encrypt_reader(input, password).map(String::into_bytes)
    }
}

/// Run one encrypt or decrypt pass as described by `cli`.
pub fn execute(cli: &CryptCli) -> Result<()> {
    let password = prompt_password(cli.password.as_deref())?;

    let output = match &cli.input_file {
        Some(path) => transform(File::open(path)?, password.as_bytes(), cli.decrypt)?,
        None => transform(io::stdin().lock(), password.as_bytes(), cli.decrypt)?,
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(&output)?;
    stdout.flush()?;
    Ok(())
}
