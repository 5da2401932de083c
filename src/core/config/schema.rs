//! core::config::schema
//!
//! Configuration file schema.
//!
//! # Location
//!
//! Searched in order:
//! 1. `$WOOFLAT_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/wooflat/config.toml`
//! 3. `~/.wooflat/config.toml`
//!
//! # Validation
//!
//! Values are validated after parsing. The store password is
//! not part of the schema; it comes from the environment or a prompt.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Largest page size the categories endpoint accepts.
pub const MAX_PER_PAGE: u32 = 100;

/// Configuration file contents.
///
/// A leading `~` in `output_dir` is expanded to the home directory.
///
/// # Example
///
/// ```toml
/// base_url = "https://shop.example.com"
/// username = "exporter"
/// per_page = 50
/// output_dir = "~/exports"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Store URL (e.g., "https://shop.example.com")
    pub base_url: Option<String>,

    /// Login used to request a JWT
    pub username: Option<String>,

    /// Categories per page
    pub per_page: Option<u32>,

    /// Directory the export files are written to
    pub output_dir: Option<PathBuf>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(per_page) = self.per_page {
            validate_per_page(per_page)?;
        }

        if let Some(username) = &self.username {
            if username.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "username cannot be blank".into(),
                ));
            }
        }

        Ok(())
    }
}

/// Check that a page size is within what the API accepts.
pub fn validate_per_page(per_page: u32) -> Result<(), ConfigError> {
    if per_page == 0 || per_page > MAX_PER_PAGE {
        return Err(ConfigError::InvalidValue(format!(
            "per_page must be between 1 and {}, got {}",
            MAX_PER_PAGE, per_page
        )));
    }
    Ok(())
}
