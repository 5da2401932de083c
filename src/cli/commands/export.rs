//! cli::commands::export
//!
//! Log in to a store, fetch its categories, and write the export files.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use chrono::Local;

use super::resolve_settings;
use crate::api::WooCommerceClient;
use crate::auth::Credentials;
use crate::cli::Context;
use crate::core::config::{CliOverrides, ConfigError};
use crate::core::naming::host_slug;
use crate::export::{run_export, ExportRequest};
use crate::ui::prompts::{self, PromptError};

/// Arguments to the export command.
#[derive(Debug, Default)]
pub struct ExportArgs {
    pub overrides: CliOverrides,
    pub env_file: Option<PathBuf>,
    /// Write the raw dump even without `--debug`
    pub raw: bool,
}

/// Run the export command.
///
/// This is a synchronous wrapper that uses tokio to run the async pipeline.
pub fn export(ctx: &Context, args: ExportArgs) -> Result<()> {
    let settings = resolve_settings(args.env_file.as_deref(), &args.overrides)?
        .settings
        .require()?;

    let password = match settings.password {
        Some(password) => password,
        None => ask_password(ctx, &settings.username)?,
    };

    let request = ExportRequest {
        credentials: Credentials::new(settings.username, password),
        per_page: settings.per_page,
        output_dir: settings.output_dir,
        host: host_slug(&settings.base_url)?,
        write_raw: args.raw || ctx.debug,
        started_at: Local::now(),
    };
    let source = WooCommerceClient::new(settings.base_url);

    let rt = tokio::runtime::Runtime::new()?;
    let outcome = rt
        .block_on(run_export(&source, &request, ctx.verbosity()))
        .with_context(|| format!("Export from {} failed", source.base_url()))?;

    tracing::info!(
        fetched = outcome.fetched,
        exported = outcome.report.entries.len(),
        orphans = outcome.report.orphans.len(),
        passes = outcome.report.passes,
        "export finished"
    );
    Ok(())
}

fn ask_password(ctx: &Context, username: &str) -> Result<String> {
    match prompts::password(&format!("Password for {}: ", username), ctx.interactive) {
        Ok(password) => Ok(password),
        Err(PromptError::NotInteractive) => Err(ConfigError::MissingPassword.into()),
        Err(e) => Err(e).context("Failed to read password"),
    }
}
