//! export::pipeline
//!
//! End-to-end export: log in, fetch every page, flatten, write files.

use std::path::PathBuf;

use chrono::{DateTime, Local};

use super::writer::write_json_atomic;
use super::ExportError;
use crate::api::{fetch_all_categories, CategorySource};
use crate::auth::Credentials;
use crate::core::hierarchy::{flatten, FlattenReport};
use crate::core::naming::{export_file_name, ExportKind};
use crate::ui::output::{self, Verbosity};

/// Everything an export run needs besides the source.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub credentials: Credentials,
    pub per_page: u32,
    pub output_dir: PathBuf,
    /// File-name fragment for the store (see [`crate::core::naming::host_slug`])
    pub host: String,
    /// Also write the categories as received
    pub write_raw: bool,
    /// Timestamp embedded in the file names
    pub started_at: DateTime<Local>,
}

/// What an export run produced.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub flattened_path: PathBuf,
    pub raw_path: Option<PathBuf>,
    /// Categories received from the source
    pub fetched: usize,
    pub report: FlattenReport,
}

/// Run an export against `source`.
///
/// Orphaned categories are reported as a warning and left out of the
/// flattened file; they do not fail the run.
pub async fn run_export(
    source: &dyn CategorySource,
    request: &ExportRequest,
    verbosity: Verbosity,
) -> Result<ExportOutcome, ExportError> {
    output::print("Logging in...", verbosity);
    let token = source.authenticate(&request.credentials).await?;

    let raw = fetch_all_categories(source, &token, request.per_page, |page| {
        output::print(format!("Fetching categories (page {}).", page), verbosity);
    })
    .await?;
    output::print("All categories found.", verbosity);
    output::print(
        format!("Writing file with {} categories.", raw.len()),
        verbosity,
    );

    output::print("Organizing subcategories.", verbosity);
    let report = flatten(&raw);
    output::debug(
        format!("Hierarchy resolved in {} pass(es).", report.passes),
        verbosity,
    );
    report_orphans(&report, verbosity);

    let flattened_path = request.output_dir.join(export_file_name(
        &request.host,
        &request.started_at,
        ExportKind::Flattened,
    ));
    write_json_atomic(&flattened_path, &report.entries)?;
    output::success(
        format!("File {} created.", flattened_path.display()),
        verbosity,
    );

    let raw_path = if request.write_raw {
        let path = request.output_dir.join(export_file_name(
            &request.host,
            &request.started_at,
            ExportKind::Raw,
        ));
        write_json_atomic(&path, &raw)?;
        output::success(
            format!("File {} (unformatted categories) created.", path.display()),
            verbosity,
        );
        Some(path)
    } else {
        None
    };

    Ok(ExportOutcome {
        flattened_path,
        raw_path,
        fetched: raw.len(),
        report,
    })
}

/// Print the orphan warning, if there are orphans.
pub fn report_orphans(report: &FlattenReport, verbosity: Verbosity) {
    if !report.has_orphans() {
        return;
    }
    output::warn(
        format!(
            "{} subcategory(ies) without an identified parent:\n{}",
            report.orphans.len(),
            output::format_list(&report.orphan_names(), "  - ")
        ),
        verbosity,
    );
}
