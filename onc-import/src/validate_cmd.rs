use anyhow::{bail, Context, Result};
use onc_import::decrypt::{decrypt, is_encrypted};
use onc_import::diagnostics::{Issue, Severity};
use onc_import::report::render_validation_text;
use onc_import::signature::Kind;
use onc_import::validator::{Validator, ValidatorOptions, Verdict};
use onc_value::parse_file;
use serde::Serialize;

use crate::cli::{OutputFormat, ValidateArgs};
use crate::passphrase::resolve_passphrase;

#[derive(Debug, Serialize)]
struct ValidateReport<'a> {
    verdict: Verdict,
    errors: usize,
    warnings: usize,
    issues: &'a [Issue],
}

pub fn run_validate(args: ValidateArgs) -> Result<()> {
    let mut document = parse_file(&args.file)
        .with_context(|| format!("failed to parse {}", args.file.display()))?;
    if is_encrypted(&document) {
        let passphrase = resolve_passphrase(&args.passphrase)?;
        document = decrypt(&passphrase, &document)
            .with_context(|| format!("failed to decrypt {}", args.file.display()))?;
    }

    let validator = Validator::new(ValidatorOptions::for_import(args.source));
    let validation = validator.validate_and_repair(Kind::Toplevel, &document);
    let errors = count(&validation.issues, Severity::Error);
    let warnings = count(&validation.issues, Severity::Warning);

    match args.format {
        OutputFormat::Text => println!("{}", render_validation_text(&validation)),
        OutputFormat::Json => {
            let report = ValidateReport {
                verdict: validation.verdict,
                errors,
                warnings,
                issues: &validation.issues,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    match validation.verdict {
        Verdict::Invalid => bail!("validate failed: document is invalid ({errors} errors)"),
        Verdict::ValidWithWarnings if args.strict => {
            bail!(
                "validate failed in strict mode: {} issue(s)",
                validation.issues.len()
            )
        }
        _ => Ok(()),
    }
}

fn count(issues: &[Issue], severity: Severity) -> usize {
    issues.iter().filter(|i| i.severity == severity).count()
}
