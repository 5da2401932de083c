//! completion command - Generate shell completion scripts

use std::io::Write;

use crate::cli::args::{Cli, Shell};
use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, shells};

/// Generate shell completion scripts on stdout.
pub fn completion(shell: Shell) -> Result<()> {
    write_completion(shell, &mut std::io::stdout());
    Ok(())
}

/// Write the completion script for `shell` to `out`.
pub fn write_completion(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    match shell {
        Shell::Bash => generate(shells::Bash, &mut cmd, &name, out),
        Shell::Zsh => generate(shells::Zsh, &mut cmd, &name, out),
        Shell::Fish => generate(shells::Fish, &mut cmd, &name, out),
        Shell::PowerShell => generate(shells::PowerShell, &mut cmd, &name, out),
    }
}
