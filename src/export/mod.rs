//! export
//!
//! Writing export files and running the export pipeline.
//!
//! # Modules
//!
//! - `writer`: 4-space pretty JSON with atomic temp-file-and-rename writes
//! - `pipeline`: login, pagination, flattening, and file output in one run

mod pipeline;
mod writer;

pub use pipeline::{report_orphans, run_export, ExportOutcome, ExportRequest};
pub use writer::{to_pretty_json, write_json_atomic};

use std::path::PathBuf;

use thiserror::Error;

use crate::api::ApiError;
use crate::core::naming::NamingError;

/// Errors from exporting.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Naming(#[from] NamingError),

    #[error("failed to write '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize export: {0}")]
    Serialize(String),
}
