use std::fs;

use anyhow::{Context, Result};
use onc_import::proxy::{
    convert_onc_proxy_settings_to_proxy_config, convert_proxy_config_to_onc_proxy_settings,
    ProxyConfig,
};
use onc_value::{parse_file, write};

use crate::cli::ProxyArgs;

pub fn run_proxy_to_generic(args: ProxyArgs) -> Result<()> {
    let settings = parse_file(&args.file)
        .with_context(|| format!("failed to parse {}", args.file.display()))?;
    let config = convert_onc_proxy_settings_to_proxy_config(&settings)
        .context("failed to convert ONC proxy settings")?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

pub fn run_proxy_from_generic(args: ProxyArgs) -> Result<()> {
    let raw = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let config: ProxyConfig = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse proxy config {}", args.file.display()))?;
    let settings = convert_proxy_config_to_onc_proxy_settings(&config)
        .context("failed to convert proxy config")?;
    let text = write(&settings).context("failed to serialize output")?;
    println!("{text}");
    Ok(())
}
