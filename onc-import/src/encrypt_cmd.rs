use anyhow::{Context, Result};
use onc_import::decrypt::encrypt;
use onc_value::{parse_file, write_file};

use crate::cli::EncryptArgs;
use crate::path_guard;

pub fn run_encrypt(args: EncryptArgs) -> Result<()> {
    path_guard::ensure_output_differs(&args.output, &args.file)?;
    let document = parse_file(&args.file)
        .with_context(|| format!("failed to parse {}", args.file.display()))?;
    let envelope = encrypt(&args.passphrase, &document, args.iterations)
        .context("failed to encrypt document")?;
    write_file(&envelope, &args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    tracing::info!(
        output = %args.output.display(),
        iterations = args.iterations,
        "wrote encrypted configuration"
    );
    Ok(())
}
