//! cli
//!
//! Command-line interface layer for wooflat.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Install the tracing subscriber
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. Handlers resolve settings through
//! [`crate::core::config`], then hand off to [`crate::export`] for the
//! actual work. Library errors are converted to `anyhow::Error` with
//! context here.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::ui::output::Verbosity;

/// Flags shared by every command.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub debug: bool,
    pub quiet: bool,
    pub interactive: bool,
}

impl Context {
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let ctx = Context {
        debug: cli.debug,
        quiet: cli.quiet,
        interactive: cli.interactive(),
    };
    init_tracing(&ctx);

    commands::dispatch(cli.command, &ctx)
}

/// Default log filter for the given flags. `RUST_LOG` overrides it.
fn default_filter(ctx: &Context) -> &'static str {
    if ctx.quiet {
        "error"
    } else if ctx.debug {
        "warn,wooflat=debug"
    } else {
        "warn"
    }
}

fn init_tracing(ctx: &Context) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(ctx)));

    // Ignore the error: a subscriber may already be installed in tests.
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .try_init();
}
