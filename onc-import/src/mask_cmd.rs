use anyhow::{Context, Result};
use onc_import::mask::{mask_credentials_in_object, DEFAULT_MASK};
use onc_import::signature::Kind;
use onc_value::{parse_file, write, write_file};

use crate::cli::MaskArgs;
use crate::path_guard;

pub fn run_mask(args: MaskArgs) -> Result<()> {
    let document = parse_file(&args.file)
        .with_context(|| format!("failed to parse {}", args.file.display()))?;
    let mask = args.mask.as_deref().unwrap_or(DEFAULT_MASK);
    let masked = mask_credentials_in_object(Kind::Toplevel, &document, mask);

    match &args.output {
        Some(output) => {
            path_guard::ensure_output_differs(output, &args.file)?;
            write_file(&masked, output)
                .with_context(|| format!("failed to write {}", output.display()))?;
        }
        None => {
            let text = write(&masked).context("failed to serialize output")?;
            println!("{text}");
        }
    }
    Ok(())
}
