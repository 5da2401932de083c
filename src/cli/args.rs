//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--debug`: Enable debug logging
//! - `--interactive` / `--no-interactive`: Control prompts
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;

/// wooflat - Export WooCommerce product categories as a flattened hierarchy
#[derive(Parser, Debug)]
#[command(name = "wooflat")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging; `export` also writes the raw category dump
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output; implies --no-interactive
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable interactive prompts
    #[arg(long = "interactive", global = true, conflicts_with = "no_interactive")]
    pub interactive_flag: bool,

    /// Disable interactive prompts
    #[arg(long, global = true)]
    pub no_interactive: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Determine if interactive mode is enabled.
    ///
    /// Returns true if:
    /// - `--interactive` was explicitly set, OR
    /// - Neither `--no-interactive` nor `--quiet` was set AND stdin is a TTY
    pub fn interactive(&self) -> bool {
        if self.interactive_flag {
            true
        } else if self.no_interactive || self.quiet {
            false
        } else {
            std::io::stdin().is_terminal()
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in to a store and export its product categories
    #[command(
        name = "export",
        long_about = "Log in to a WooCommerce store and export its product categories.\n\n\
            Authenticates with the JWT auth plugin, fetches every page of product \
            categories, and writes them as a flattened list where each entry has a \
            \"Parent > Child\" label and the slug path from the category up to its root. \
            Categories whose parent cannot be found are reported and left out.\n\n\
            Settings come from, in increasing priority: built-in defaults, the config \
            file, a .env file and the BASE_URL / USER_LOGIN / USER_PASS environment \
            variables, and the flags below. The password is prompted for when it is \
            not set and prompts are enabled.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Export using BASE_URL, USER_LOGIN and USER_PASS from .env
    wooflat export

    # Point at a store explicitly and prompt for the password
    wooflat export --base-url https://shop.example.com --username admin

    # Also keep the categories exactly as the API returned them
    wooflat export --raw --output-dir exports/

OUTPUT FILES:
    exported-categories-<host>-<YYYY-MM-DD-HHMMSS>.json       flattened list
    exported-categories-<host>-<YYYY-MM-DD-HHMMSS>-raw.json   with --raw or --debug"
    )]
    Export {
        /// Store URL, e.g. https://shop.example.com
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,

        /// WordPress user to log in as
        #[arg(long, short = 'u')]
        username: Option<String>,

        /// Categories per page (1-100)
        #[arg(long, value_name = "N")]
        per_page: Option<u32>,

        /// Directory to write export files into
        #[arg(long, short = 'o', value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Load environment variables from this file instead of ./.env
        #[arg(long, value_name = "PATH")]
        env_file: Option<PathBuf>,

        /// Also write the categories as received from the API
        #[arg(long)]
        raw: bool,
    },

    /// Flatten a previously exported raw category list
    #[command(
        name = "flatten",
        long_about = "Flatten a JSON array of categories without contacting a store.\n\n\
            Reads categories with id, name, slug and parent fields (for example a \
            -raw.json dump from `wooflat export --raw`) and prints the flattened list. \
            Orphaned categories are reported on stderr.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Re-flatten a raw dump to stdout
    wooflat flatten exported-categories-shop-example-com-2024-05-06-070809-raw.json

    # Read from stdin and write to a file
    curl -s ... | wooflat flatten - --output categories.json"
    )]
    Flatten {
        /// Raw category JSON file, or `-` for stdin
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Write the flattened list here instead of stdout
        #[arg(long, short = 'o', value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Show the effective configuration
    #[command(
        name = "config",
        long_about = "Show the effective configuration and where each value came from.\n\n\
            The password is never printed; only whether it is set.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Check which store an export would use
    wooflat config

    # Check what a .env file in another directory would change
    wooflat config --env-file ../shop/.env"
    )]
    Config {
        /// Load environment variables from this file instead of ./.env
        #[arg(long, value_name = "PATH")]
        env_file: Option<PathBuf>,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for wooflat commands.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    wooflat completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    wooflat completion zsh >> ~/.zshrc

    # Fish
    wooflat completion fish > ~/.config/fish/completions/wooflat.fish

    # PowerShell
    wooflat completion power-shell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn quiet_disables_prompts() {
        let cli = Cli::parse_from(["wooflat", "-q", "config"]);
        assert!(!cli.interactive());
    }

    #[test]
    fn export_flags_parse() {
        let cli = Cli::parse_from([
            "wooflat",
            "export",
            "--base-url",
            "https://shop.example.com",
            "--per-page",
            "50",
            "--raw",
        ]);
        match cli.command {
            Command::Export {
                base_url,
                per_page,
                raw,
                ..
            } => {
                assert_eq!(base_url.as_deref(), Some("https://shop.example.com"));
                assert_eq!(per_page, Some(50));
                assert!(raw);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn interactive_conflicts_with_no_interactive() {
        let result = Cli::try_parse_from(["wooflat", "--interactive", "--no-interactive", "config"]);
        assert!(result.is_err());
    }
}
