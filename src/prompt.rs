// src/prompt.rs

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// Ask `Are you sure you want to <action>? [y/N]` and read one line.
/// Only `y`/`yes` (any case) confirms; EOF declines.
pub fn confirm<R: BufRead, W: Write>(action: &str, mut input: R, mut out: W) -> Result<bool> {
    write!(out, "Are you sure you want to {}? [y/N] ", action)?;
    out.flush()?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("reading confirmation from stdin")?;
    Ok(matches!(
        line.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

/// [`confirm`] on the process terminal.
pub fn confirm_stdin(action: &str) -> Result<bool> {
    let stdin = std::io::stdin();
    confirm(action, stdin.lock(), std::io::stdout())
}
