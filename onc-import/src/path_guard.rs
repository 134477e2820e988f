use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

/// Refuse to write `output` over the document it was produced from.
pub fn ensure_output_differs(output: &Path, input: &Path) -> Result<()> {
    let output_abs = comparable_path(output)
        .with_context(|| format!("failed to resolve output path {}", output.display()))?;
    let input_abs = comparable_path(input)
        .with_context(|| format!("failed to resolve input path {}", input.display()))?;
    if output_abs == input_abs {
        bail!(
            "refusing to overwrite input document {} with output {}",
            input.display(),
            output.display()
        );
    }
    Ok(())
}

fn comparable_path(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return path
            .canonicalize()
            .with_context(|| format!("canonicalize {}", path.display()));
    }
    // `..` in a path that does not exist yet is left unresolved.
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::env::current_dir().context("current_dir")?.join(path))
}
