//! CLI command definitions and execution
//!
//! Every storage command receives one shared client and returns `ncs_core::Result`.
//! Errors are turned into messages and exit codes in one place, [`execute`].

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ncs_core::{
    Config, ConfigManager, Error, Result, StorageConfig, StorageOverrides, StorageProfile,
};
use ncs_s3::{S3Client, UploadConfig};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod completions;
mod config;
mod ls;
mod put;
mod rb;
mod run;

/// ncs - object storage CLI client
///
/// A command-line interface for NCP Object Storage and other S3-compatible services.
#[derive(Parser, Debug)]
#[command(name = "ncs")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Disable progress spinner
    #[arg(long, global = true, default_value = "false")]
    pub no_progress: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    /// Configuration file to use instead of the default location
    #[arg(long, global = true, env = "NCS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Service endpoint URL
    #[arg(long, global = true, env = "NCS_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Signing region
    #[arg(long, global = true, env = "NCS_REGION")]
    pub region: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List buckets, or the objects in a bucket
    Ls(ls::LsArgs),

    /// Remove an empty bucket
    Rb(rb::RbArgs),

    /// Upload a local file as an object
    Put(put::PutArgs),

    /// List buckets, list a bucket, remove it, then upload a file into it
    Run(run::RunArgs),

    /// Inspect or create the configuration file
    #[command(subcommand)]
    Config(config::ConfigCommands),

    /// Generate shell completion scripts
    Completions(completions::CompletionsArgs),
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let flags = OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        no_progress: cli.no_progress,
        quiet: cli.quiet,
    };

    let command = cli.command;
    if let Commands::Completions(args) = command {
        return completions::execute(args);
    }

    let manager = match cli.config {
        Some(path) => ConfigManager::with_path(path),
        None => match ConfigManager::new() {
            Ok(manager) => manager,
            Err(e) => return finish(&Formatter::new(flags), &StorageProfile::default(), Err(e)),
        },
    };

    let config = match manager.load() {
        Ok(config) => config,
        Err(e) => return finish(&Formatter::new(flags), &StorageProfile::default(), Err(e)),
    };

    let formatter = Formatter::new(flags.with_defaults(&config.defaults));
    let overrides = StorageOverrides {
        endpoint: cli.endpoint,
        region: cli.region,
    };

    let result = match command {
        Commands::Config(cmd) => config::execute(cmd, &manager, &config, &overrides, &formatter),
        command => run_storage_command(command, &config, &overrides, &formatter).await,
    };

    finish(&formatter, &config.storage, result)
}

/// Build the single client for this process and run one storage command with it
async fn run_storage_command(
    command: Commands,
    config: &Config,
    overrides: &StorageOverrides,
    formatter: &Formatter,
) -> Result<()> {
    let storage = StorageConfig::from_env(&config.storage, overrides)?;
    let client = S3Client::new(&storage).await?;

    match command {
        Commands::Ls(args) => ls::execute(args, &client, formatter).await,
        Commands::Rb(args) => rb::execute(args, &client, formatter).await,
        Commands::Put(args) => {
            let upload = UploadConfig::new().part_size(args.part_size_mib.saturating_mul(1024 * 1024));
            let client = client.with_upload_config(upload);
            put::execute(args, &client, formatter).await
        }
        Commands::Run(args) => run::execute(args, &client, formatter).await,
        // Handled in `execute` before any client exists
        Commands::Config(_) | Commands::Completions(_) => Ok(()),
    }
}

/// Report the outcome of a command and pick the exit code
///
/// The formatter owns stderr for failures; the log record only carries the
/// exit code for `--debug` runs.
fn finish(formatter: &Formatter, profile: &StorageProfile, result: Result<()>) -> ExitCode {
    let Err(e) = result else {
        return ExitCode::Success;
    };

    let code = ExitCode::from(&e);
    tracing::debug!(error = %e, exit_code = code.as_i32(), "command failed");
    formatter.failure(&e, code);
    if let Some(hint) = failure_hint(&e, profile) {
        formatter.warning(&hint);
    }
    code
}

/// Follow-up advice for errors the user can fix locally
fn failure_hint(err: &Error, profile: &StorageProfile) -> Option<String> {
    match err {
        Error::Auth(_) => Some(format!(
            "Check the credentials in {} and {}.",
            profile.access_key_env, profile.secret_key_env
        )),
        _ => None,
    }
}
