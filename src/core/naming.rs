//! core::naming
//!
//! Output file naming.
//!
//! # Format
//!
//! `exported-categories-<host>-<timestamp>.json`, where `<host>` is the store
//! host name with dots replaced by dashes and `<timestamp>` is local time as
//! `YYYY-MM-DD-HHMMSS`. The raw dump uses the same stem with a `-raw` suffix.

use chrono::{DateTime, TimeZone};
use thiserror::Error;
use url::Url;

/// Prefix shared by every exported file.
pub const FILE_PREFIX: &str = "exported-categories";

/// Timestamp layout used in file names.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H%M%S";

/// Errors from deriving file names.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NamingError {
    #[error("invalid store URL '{0}'")]
    InvalidUrl(String),

    #[error("store URL '{0}' has no host name")]
    MissingHost(String),
}

/// Which file of an export is being named.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// The flattened label/value list.
    Flattened,
    /// The categories exactly as the API returned them.
    Raw,
}

/// Derive the file-name fragment for a store URL.
///
/// # Example
///
/// ```
/// use wooflat::core::naming::host_slug;
///
/// assert_eq!(host_slug("https://shop.example.com").unwrap(), "shop-example-com");
/// assert_eq!(host_slug("http://localhost:8080/store").unwrap(), "localhost");
/// ```
pub fn host_slug(base_url: &str) -> Result<String, NamingError> {
    let url = Url::parse(base_url).map_err(|_| NamingError::InvalidUrl(base_url.to_string()))?;
    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| NamingError::MissingHost(base_url.to_string()))?;
    Ok(host.replace('.', "-"))
}

/// Build the file name for one file of an export.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use wooflat::core::naming::{export_file_name, ExportKind};
///
/// let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
/// assert_eq!(
///     export_file_name("shop-example-com", &at, ExportKind::Flattened),
///     "exported-categories-shop-example-com-2024-03-09-140507.json"
/// );
/// ```
pub fn export_file_name<Tz>(host: &str, at: &DateTime<Tz>, kind: ExportKind) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let stamp = at.format(TIMESTAMP_FORMAT);
    match kind {
        ExportKind::Flattened => format!("{}-{}-{}.json", FILE_PREFIX, host, stamp),
        ExportKind::Raw => format!("{}-{}-{}-raw.json", FILE_PREFIX, host, stamp),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn host_slug_replaces_every_dot() {
        assert_eq!(
            host_slug("https://loja.minha.com.br/").unwrap(),
            "loja-minha-com-br"
        );
    }

    #[test]
    fn host_slug_ignores_path_and_port() {
        assert_eq!(
            host_slug("https://example.org:8443/wp/shop").unwrap(),
            "example-org"
        );
    }

    #[test]
    fn host_slug_rejects_garbage() {
        assert_eq!(
            host_slug("not a url"),
            Err(NamingError::InvalidUrl("not a url".into()))
        );
    }

    #[test]
    fn host_slug_rejects_hostless_url() {
        assert!(matches!(
            host_slug("file:///tmp/x"),
            Err(NamingError::MissingHost(_))
        ));
    }

    #[test]
    fn raw_file_name_has_suffix() {
        let at = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 1).unwrap();
        assert_eq!(
            export_file_name("example-org", &at, ExportKind::Raw),
            "exported-categories-example-org-2023-12-31-235901-raw.json"
        );
    }

    #[test]
    fn month_is_zero_padded_and_one_based() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let name = export_file_name("h", &at, ExportKind::Flattened);
        assert!(name.contains("2024-01-02-030405"));
    }
}
