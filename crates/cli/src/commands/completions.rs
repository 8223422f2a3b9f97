//! completions command - Shell completion scripts for `ncs`

use std::io::Write;

use clap::CommandFactory;
use clap_complete::Shell;

use super::Cli;
use crate::exit_code::ExitCode;

/// Arguments for the completions command
#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Print the completion script for the chosen shell to stdout
pub fn execute(args: CompletionsArgs) -> ExitCode {
    write_script(args.shell, &mut std::io::stdout());
    ExitCode::Success
}

fn write_script(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, out);
}
