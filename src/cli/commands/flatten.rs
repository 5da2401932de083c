//! cli::commands::flatten
//!
//! Flatten a raw category list offline.

use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::core::hierarchy;
use crate::core::types::RawCategory;
use crate::export::{report_orphans, to_pretty_json, write_json_atomic};
use crate::ui::output;

/// Run the flatten command.
///
/// `input` of `-` reads stdin. Without `dest` the flattened list goes to
/// stdout, so nothing else is printed there.
pub fn flatten(ctx: &Context, input: &Path, dest: Option<&Path>) -> Result<()> {
    let contents = read_input(input)?;
    let categories: Vec<RawCategory> = serde_json::from_str(&contents)
        .with_context(|| format!("'{}' is not a JSON array of categories", input.display()))?;

    let report = hierarchy::flatten(&categories);
    report_orphans(&report, ctx.verbosity());

    match dest {
        Some(path) => {
            write_json_atomic(path, &report.entries)?;
            output::success(format!("File {} created.", path.display()), ctx.verbosity());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&to_pretty_json(&report.entries)?)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

fn read_input(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read '{}'", input.display()))
    }
}
