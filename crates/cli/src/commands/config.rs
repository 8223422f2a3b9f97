//! config command - Inspect or create the configuration file

use clap::{Args, Subcommand};
use ncs_core::{Config, ConfigManager, Error, Result, StorageConfig, StorageOverrides};
use serde::Serialize;

use crate::output::Formatter;

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective storage settings
    Show,

    /// Write a default configuration file
    Init(InitArgs),
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Serialize)]
struct ShowOutput<'a> {
    config_path: String,
    endpoint: &'a str,
    region: &'a str,
    force_path_style: bool,
    access_key_env: &'a str,
    secret_key_env: &'a str,
    credentials_set: bool,
}

/// Execute a config subcommand
pub fn execute(
    cmd: ConfigCommands,
    manager: &ConfigManager,
    config: &Config,
    overrides: &StorageOverrides,
    formatter: &Formatter,
) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show(manager, config, overrides, formatter),
        ConfigCommands::Init(args) => init(manager, args.force, formatter),
    }
}

fn show(
    manager: &ConfigManager,
    config: &Config,
    overrides: &StorageOverrides,
    formatter: &Formatter,
) -> Result<()> {
    let storage = StorageConfig::from_env(&config.storage, overrides)?;
    let output = ShowOutput {
        config_path: manager.config_path().display().to_string(),
        endpoint: &storage.endpoint,
        region: &storage.region,
        force_path_style: storage.force_path_style,
        access_key_env: &config.storage.access_key_env,
        secret_key_env: &config.storage.secret_key_env,
        credentials_set: storage.credentials.is_complete(),
    };

    if formatter.is_json() {
        formatter.json(&output);
    } else {
        formatter.println(&format!("Config file:  {}", output.config_path));
        formatter.println(&format!("Endpoint:     {}", output.endpoint));
        formatter.println(&format!("Region:       {}", output.region));
        formatter.println(&format!("Path style:   {}", output.force_path_style));
        formatter.println(&format!(
            "Credentials:  {} / {} ({})",
            output.access_key_env,
            output.secret_key_env,
            if output.credentials_set { "set" } else { "not set" }
        ));
    }

    Ok(())
}

fn init(manager: &ConfigManager, force: bool, formatter: &Formatter) -> Result<()> {
    let path = manager.config_path();
    if path.exists() && !force {
        return Err(Error::Conflict(format!(
            "{} already exists; use --force to overwrite",
            path.display()
        )));
    }

    manager.save(&Config::default())?;
    tracing::info!(path = %path.display(), "wrote default config");
    formatter.success(&format!("Wrote {}", path.display()));
    Ok(())
}
