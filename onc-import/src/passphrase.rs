use std::fs;

use anyhow::{Context, Result};

use crate::cli::PassphraseArgs;

/// The passphrase given on the command line, or an empty one.
pub fn resolve_passphrase(args: &PassphraseArgs) -> Result<String> {
    if let Some(passphrase) = &args.passphrase {
        return Ok(passphrase.clone());
    }
    let Some(path) = &args.passphrase_file else {
        return Ok(String::new());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read passphrase file {}", path.display()))?;
    Ok(raw.trim_end_matches(['\r', '\n']).to_string())
}
