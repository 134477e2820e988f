use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use onc_import::source::OncSource;

#[derive(Parser, Debug)]
#[command(name = "onc-import")]
#[command(about = "Import, validate and transform Open Network Configuration documents")]
pub struct Cli {
    /// Log debug details to stderr (overrides ONC_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Run the full import pipeline on one document.
    Import(ImportArgs),
    /// Validate one document and report the verdict.
    Validate(ValidateArgs),
    /// Wrap a document in a passphrase-protected envelope.
    Encrypt(EncryptArgs),
    /// Replace every credential in a document with a mask.
    Mask(MaskArgs),
    /// Convert ONC ProxySettings to a generic proxy config.
    ProxyToGeneric(ProxyArgs),
    /// Convert a generic proxy config to ONC ProxySettings.
    ProxyFromGeneric(ProxyArgs),
}

#[derive(Parser, Debug)]
pub struct PassphraseArgs {
    /// Passphrase for encrypted documents.
    #[arg(long, conflicts_with = "passphrase_file")]
    pub passphrase: Option<String>,
    /// Read the passphrase from a file (trailing newline ignored).
    #[arg(long)]
    pub passphrase_file: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct ImportArgs {
    /// ONC document to import.
    pub file: PathBuf,
    /// Where the document came from (overrides the profile).
    #[arg(long)]
    pub source: Option<OncSource>,
    #[command(flatten)]
    pub passphrase: PassphraseArgs,
    /// Import profile TOML (defaults to the embedded profile).
    #[arg(long)]
    pub profile: Option<PathBuf>,
    /// Value for ${LOGIN_ID}.
    #[arg(long)]
    pub login_id: Option<String>,
    /// Value for ${LOGIN_EMAIL}.
    #[arg(long)]
    pub email: Option<String>,
    /// Mask credentials in the output.
    #[arg(long)]
    pub mask_credentials: bool,
    /// Only report networks of this ONC type (All, Wireless, WiFi, VPN, ...).
    #[arg(long = "type")]
    pub network_type: Option<String>,
    /// Write the processed document to this file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Fail when the import is degraded (warnings or dropped networks).
    #[arg(long)]
    pub strict: bool,
}

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// ONC document to validate.
    pub file: PathBuf,
    #[arg(long, default_value_t = OncSource::UserImport)]
    pub source: OncSource,
    #[command(flatten)]
    pub passphrase: PassphraseArgs,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Fail on warnings as well as errors.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Parser, Debug)]
pub struct EncryptArgs {
    /// Unencrypted ONC document.
    pub file: PathBuf,
    #[arg(long)]
    pub passphrase: String,
    /// PBKDF2 iteration count.
    #[arg(long, default_value_t = 20000)]
    pub iterations: u32,
    /// Output file for the envelope.
    #[arg(short, long)]
    pub output: PathBuf,
}

#[derive(Parser, Debug)]
pub struct MaskArgs {
    /// ONC document to mask.
    pub file: PathBuf,
    /// Replacement text for credentials.
    #[arg(long)]
    pub mask: Option<String>,
    /// Write the masked document here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct ProxyArgs {
    /// JSON file holding the settings to convert.
    pub file: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
