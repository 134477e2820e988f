use std::fs;

use anyhow::{bail, Context, Result};
use onc_import::import::{import_with_options, ImportOutcome};
use onc_import::names::{network, toplevel};
use onc_import::network_type::NetworkTypePattern;
use onc_import::profile::load_profile_with_source;
use onc_import::report::render_import_text;
use onc_import::substitution::UserSubstitution;
use onc_value::{write_file, Object, ObjectExt, Value};

use crate::cli::{ImportArgs, OutputFormat};
use crate::passphrase::resolve_passphrase;
use crate::path_guard;

pub fn run_import(args: ImportArgs, verbose: bool) -> Result<()> {
    let (profile, profile_source) = load_profile_with_source(args.profile.as_deref())
        .context("failed to load import profile")?;
    let source = args.source.unwrap_or(profile.source);
    let passphrase = resolve_passphrase(&args.passphrase)?;
    let filter = args
        .network_type
        .as_deref()
        .map(NetworkTypePattern::from_onc_type)
        .transpose()?;

    let mut options = profile.import_options();
    if args.login_id.is_some() || args.email.is_some() {
        let base = options.substitution.take().unwrap_or_default();
        options.substitution = Some(UserSubstitution::new(
            args.login_id.or(base.login_id),
            args.email.or(base.email),
        ));
    }
    if args.mask_credentials && options.mask.is_none() {
        options.mask = Some(profile.mask.clone());
    }

    let blob = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let mut outcome = import_with_options(&blob, source, &passphrase, &options)
        .with_context(|| format!("failed to import {}", args.file.display()))?;

    if let Some(output) = &args.output {
        path_guard::ensure_output_differs(output, &args.file)?;
        write_file(&processed_document(&outcome), output)
            .with_context(|| format!("failed to write output {}", output.display()))?;
    }

    if let Some(pattern) = filter {
        retain_network_type(&mut outcome, pattern);
    }

    match args.format {
        OutputFormat::Text => {
            let profile_line = verbose.then_some(profile_source.as_str());
            println!("{}", render_import_text(&outcome, profile_line));
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
    }

    if args.strict && !outcome.success {
        bail!(
            "import degraded in strict mode: verdict {} with {} dropped network(s)",
            outcome.verdict,
            outcome.dropped_networks.len()
        );
    }
    Ok(())
}

/// The processed outputs reassembled as an unencrypted ONC document.
fn processed_document(outcome: &ImportOutcome) -> Object {
    let mut document = Object::new();
    document.insert(
        toplevel::TYPE.to_string(),
        Value::from(toplevel::UNENCRYPTED_CONFIGURATION),
    );
    document.insert(
        toplevel::NETWORK_CONFIGURATIONS.to_string(),
        Value::Array(outcome.network_configs.clone()),
    );
    document.insert(
        toplevel::CERTIFICATES.to_string(),
        Value::Array(outcome.certificates.clone()),
    );
    if !outcome.global_network_config.is_empty() {
        document.insert(
            toplevel::GLOBAL_NETWORK_CONFIGURATION.to_string(),
            Value::Object(outcome.global_network_config.clone()),
        );
    }
    document
}

fn retain_network_type(outcome: &mut ImportOutcome, pattern: NetworkTypePattern) {
    outcome.network_configs.retain(|entry| {
        entry
            .as_object()
            .and_then(|object| object.get_str(network::TYPE))
            .is_some_and(|onc_type| pattern.matches(onc_type))
    });
}
