//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Resolves settings from config file, environment, and flags
//! 2. Calls into [`crate::export`] to do the work
//! 3. Formats and displays output
//!
//! # Async Commands
//!
//! `export` talks to the network. Its handler creates a tokio runtime and
//! blocks on the async pipeline, so the rest of the CLI stays synchronous.

mod completion;
mod config_cmd;
mod export;
mod flatten;

pub use completion::{completion, write_completion};
pub use config_cmd::config;
pub use export::{export, ExportArgs};
pub use flatten::flatten;

use std::path::Path;

use anyhow::{Context as _, Result};

use crate::cli::args::Command;
use crate::cli::Context;
use crate::core::config::{load_dotenv, CliOverrides, Config, EnvConfig, Settings};

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Export {
            base_url,
            username,
            per_page,
            output_dir,
            env_file,
            raw,
        } => export(
            ctx,
            ExportArgs {
                overrides: CliOverrides {
                    base_url,
                    username,
                    per_page,
                    output_dir,
                },
                env_file,
                raw,
            },
        ),
        Command::Flatten { input, output } => flatten(ctx, &input, output.as_deref()),
        Command::Config { env_file } => config(ctx, env_file.as_deref()),
        Command::Completion { shell } => completion(shell),
    }
}

/// Everything that went into a [`Settings`] value.
pub(crate) struct Resolved {
    pub config: Config,
    pub env_file: Option<std::path::PathBuf>,
    pub settings: Settings,
}

/// Load `.env`, the config file, and the environment, then apply flags.
pub(crate) fn resolve_settings(
    env_file: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<Resolved> {
    let env_file = load_dotenv(env_file)?;
    let config = Config::load().context("Failed to load config")?;
    let settings = config.merge(&EnvConfig::from_env(), overrides)?;
    tracing::debug!(?settings, config = ?config.loaded_from(), "resolved settings");
    Ok(Resolved {
        config,
        env_file,
        settings,
    })
}
