use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod encrypt_cmd;
mod import_cmd;
mod mask_cmd;
mod passphrase;
mod path_guard;
mod proxy_cmd;
mod validate_cmd;

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Import(args) => import_cmd::run_import(args, cli.verbose),
        Command::Validate(args) => validate_cmd::run_validate(args),
        Command::Encrypt(args) => encrypt_cmd::run_encrypt(args),
        Command::Mask(args) => mask_cmd::run_mask(args),
        Command::ProxyToGeneric(args) => proxy_cmd::run_proxy_to_generic(args),
        Command::ProxyFromGeneric(args) => proxy_cmd::run_proxy_from_generic(args),
    }
}

/// Diagnostics go to stderr so stdout stays machine-readable.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("ONC_LOG")
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
