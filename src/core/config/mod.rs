//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file (see [`schema`] for locations)
//! 3. Environment (`BASE_URL`, `USER_LOGIN`, `USER_PASS`), after `.env`
//!    has been loaded into it
//! 4. CLI flags
//!
//! # Example
//!
//! ```no_run
//! use wooflat::core::config::{CliOverrides, Config, EnvConfig};
//!
//! let config = Config::load().unwrap();
//! let settings = config.merge(&EnvConfig::from_env(), &CliOverrides::default()).unwrap();
//! let export = settings.require().unwrap();
//! println!("Exporting from {}", export.base_url);
//! ```

pub mod schema;

pub use schema::{FileConfig, MAX_PER_PAGE};

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use url::Url;

/// Environment variable holding the store URL.
pub const ENV_BASE_URL: &str = "BASE_URL";
/// Environment variable holding the login.
pub const ENV_USERNAME: &str = "USER_LOGIN";
/// Environment variable holding the password.
pub const ENV_PASSWORD: &str = "USER_PASS";
/// Environment variable pointing at an explicit config file.
pub const ENV_CONFIG_PATH: &str = "WOOFLAT_CONFIG";

/// Default page size.
pub const DEFAULT_PER_PAGE: u32 = MAX_PER_PAGE;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to load env file '{path}': {message}")]
    EnvFile { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("store URL is empty. Set BASE_URL in your .env file or pass --base-url")]
    MissingBaseUrl,

    #[error("invalid store URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("username is empty. Set USER_LOGIN in your .env file or pass --username")]
    MissingUsername,

    #[error("password is empty. Set USER_PASS in your .env file")]
    MissingPassword,
}

/// Where a setting's value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Default,
    File,
    Env,
    Flag,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Default => write!(f, "default"),
            Source::File => write!(f, "config file"),
            Source::Env => write!(f, "environment"),
            Source::Flag => write!(f, "command line"),
        }
    }
}

/// Settings read from the process environment.
#[derive(Clone, Default, PartialEq)]
pub struct EnvConfig {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

// Custom Debug to avoid exposing the password
impl fmt::Debug for EnvConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("has_password", &self.password.is_some())
            .finish()
    }
}

impl EnvConfig {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        Self {
            base_url: get(ENV_BASE_URL),
            username: get(ENV_USERNAME),
            password: get(ENV_PASSWORD),
        }
    }
}

/// Values given as command-line flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub per_page: Option<u32>,
    pub output_dir: Option<PathBuf>,
}

/// Load a `.env` file into the process environment.
///
/// Variables already set in the environment are not overridden. Without an
/// explicit path, a missing `.env` is not an error.
///
/// Returns the path that was loaded, if any.
pub fn load_dotenv(explicit: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    match explicit {
        Some(path) => dotenvy::from_path(path)
            .map(|_| Some(path.to_path_buf()))
            .map_err(|e| ConfigError::EnvFile {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        None => match dotenvy::dotenv() {
            Ok(path) => Ok(Some(path)),
            Err(e) if e.not_found() => Ok(None),
            Err(e) => Err(ConfigError::EnvFile {
                path: PathBuf::from(".env"),
                message: e.to_string(),
            }),
        },
    }
}

/// Configuration loaded from the config file.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// File contents (defaults if no file was found)
    pub file: FileConfig,
    /// Path the file was loaded from
    file_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed.
    /// A missing config file is not an error (defaults are used).
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find_config_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let file = Self::read_config(path)?;
        file.validate()?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(Self {
            file,
            file_path: Some(path.to_path_buf()),
        })
    }

    /// Find the first existing config file.
    fn find_config_file() -> Option<PathBuf> {
        // 1. Check $WOOFLAT_CONFIG
        if let Ok(path) = std::env::var(ENV_CONFIG_PATH) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Check $XDG_CONFIG_HOME/wooflat/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("wooflat/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.wooflat/config.toml
        let path = dirs::home_dir()?.join(".wooflat/config.toml");
        path.exists().then_some(path)
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the path of the loaded config file.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Merge this file with the environment and CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if a merged value is invalid. Missing values are
    /// not an error here; see [`Settings::require`].
    pub fn merge(&self, env: &EnvConfig, flags: &CliOverrides) -> Result<Settings, ConfigError> {
        let mut sources = BTreeMap::new();

        let base_url = pick(
            &mut sources,
            "base_url",
            [
                (Source::File, self.file.base_url.clone()),
                (Source::Env, env.base_url.clone()),
                (Source::Flag, flags.base_url.clone()),
            ],
        )
        .map(|url| normalize_base_url(&url))
        .filter(|url| !url.is_empty());
        if base_url.is_none() {
            sources.remove("base_url");
        }

        let username = pick(
            &mut sources,
            "username",
            [
                (Source::File, self.file.username.clone()),
                (Source::Env, env.username.clone()),
                (Source::Flag, flags.username.clone()),
            ],
        );

        let password = pick(
            &mut sources,
            "password",
            [(Source::Env, env.password.clone())],
        );

        let per_page = pick(
            &mut sources,
            "per_page",
            [
                (Source::Default, Some(DEFAULT_PER_PAGE)),
                (Source::File, self.file.per_page),
                (Source::Flag, flags.per_page),
            ],
        )
        .unwrap_or(DEFAULT_PER_PAGE);
        schema::validate_per_page(per_page)?;

        let output_dir = pick(
            &mut sources,
            "output_dir",
            [
                (Source::Default, Some(PathBuf::from("."))),
                (Source::File, self.file.output_dir.clone()),
                (Source::Flag, flags.output_dir.clone()),
            ],
        )
        .map(|dir| expand_home(&dir, dirs::home_dir().as_deref()))
        .unwrap_or_else(|| PathBuf::from("."));

        if let Some(url) = &base_url {
            validate_base_url(url)?;
        }

        Ok(Settings {
            base_url,
            username,
            password,
            per_page,
            output_dir,
            sources,
        })
    }
}

/// Take the last layer that has a value, recording its source.
fn pick<T, const N: usize>(
    sources: &mut BTreeMap<&'static str, Source>,
    key: &'static str,
    layers: [(Source, Option<T>); N],
) -> Option<T> {
    let (source, value) = layers
        .into_iter()
        .rev()
        .find_map(|(source, value)| value.map(|v| (source, v)))?;
    sources.insert(key, source);
    Some(value)
}

/// Replace a leading `~` with the home directory.
///
/// Paths without a leading `~` component, or any path when there is no
/// home directory, are returned unchanged.
fn expand_home(path: &Path, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix("~"), home) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

/// Trim surrounding slashes and whitespace from a store URL.
///
/// # Example
///
/// ```
/// use wooflat::core::config::normalize_base_url;
///
/// assert_eq!(normalize_base_url("https://shop.example.com/"), "https://shop.example.com");
/// ```
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_matches('/').to_string()
}

/// Check that a store URL is an absolute http(s) URL with a host.
pub fn validate_base_url(url: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidBaseUrl {
        url: url.to_string(),
        reason: reason.to_string(),
    };

    let parsed = Url::parse(url).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host name"));
    }
    Ok(())
}

/// Merged settings; some values may still be missing.
#[derive(Clone)]
pub struct Settings {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub per_page: u32,
    pub output_dir: PathBuf,
    sources: BTreeMap<&'static str, Source>,
}

// Custom Debug to avoid exposing the password
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("has_password", &self.password.is_some())
            .field("per_page", &self.per_page)
            .field("output_dir", &self.output_dir)
            .finish()
    }
}

impl Settings {
    /// Where a setting came from, if it is set.
    pub fn source(&self, key: &str) -> Option<Source> {
        self.sources.get(key).copied()
    }

    /// Check that everything an export needs is present.
    ///
    /// The password may still be missing; the caller decides whether to
    /// prompt for it.
    pub fn require(self) -> Result<ExportSettings, ConfigError> {
        let base_url = self.base_url.ok_or(ConfigError::MissingBaseUrl)?;
        let username = self.username.ok_or(ConfigError::MissingUsername)?;
        Ok(ExportSettings {
            base_url,
            username,
            password: self.password,
            per_page: self.per_page,
            output_dir: self.output_dir,
        })
    }
}

/// Settings for a network export.
#[derive(Clone)]
pub struct ExportSettings {
    pub base_url: String,
    pub username: String,
    pub password: Option<String>,
    pub per_page: u32,
    pub output_dir: PathBuf,
}

// Custom Debug to avoid exposing the password
impl fmt::Debug for ExportSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportSettings")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("has_password", &self.password.is_some())
            .field("per_page", &self.per_page)
            .field("output_dir", &self.output_dir)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn env(base_url: Option<&str>, username: Option<&str>, password: Option<&str>) -> EnvConfig {
        EnvConfig {
            base_url: base_url.map(String::from),
            username: username.map(String::from),
            password: password.map(String::from),
        }
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let settings = Config::default()
            .merge(&EnvConfig::default(), &CliOverrides::default())
            .unwrap();

        assert!(settings.base_url.is_none());
        assert_eq!(settings.per_page, 100);
        assert_eq!(settings.output_dir, PathBuf::from("."));
        assert_eq!(settings.source("per_page"), Some(Source::Default));
        assert_eq!(settings.source("base_url"), None);
    }

    #[test]
    fn env_overrides_file_and_flag_overrides_env() {
        let config = Config {
            file: FileConfig {
                base_url: Some("https://file.example.com".into()),
                username: Some("file-user".into()),
                per_page: Some(20),
                output_dir: None,
            },
            file_path: None,
        };
        let flags = CliOverrides {
            username: Some("flag-user".into()),
            ..Default::default()
        };

        let settings = config
            .merge(&env(Some("https://env.example.com/"), Some("env-user"), None), &flags)
            .unwrap();

        assert_eq!(settings.base_url.as_deref(), Some("https://env.example.com"));
        assert_eq!(settings.source("base_url"), Some(Source::Env));
        assert_eq!(settings.username.as_deref(), Some("flag-user"));
        assert_eq!(settings.source("username"), Some(Source::Flag));
        assert_eq!(settings.per_page, 20);
        assert_eq!(settings.source("per_page"), Some(Source::File));
    }

    #[test]
    fn slash_only_base_url_counts_as_missing() {
        let settings = Config::default()
            .merge(&env(Some("///"), None, None), &CliOverrides::default())
            .unwrap();
        assert!(settings.base_url.is_none());
        assert!(matches!(
            settings.require(),
            Err(ConfigError::MissingBaseUrl)
        ));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = Config::default().merge(
            &env(Some("ftp://shop.example.com"), None, None),
            &CliOverrides::default(),
        );
        assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn flag_per_page_is_validated() {
        let flags = CliOverrides {
            per_page: Some(500),
            ..Default::default()
        };
        let result = Config::default().merge(&EnvConfig::default(), &flags);
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn require_reports_missing_username() {
        let settings = Config::default()
            .merge(&env(Some("https://shop.example.com"), None, None), &CliOverrides::default())
            .unwrap();
        assert!(matches!(
            settings.require(),
            Err(ConfigError::MissingUsername)
        ));
    }

    #[test]
    fn require_allows_missing_password() {
        let settings = Config::default()
            .merge(
                &env(Some("https://shop.example.com"), Some("admin"), None),
                &CliOverrides::default(),
            )
            .unwrap();
        let export = settings.require().unwrap();
        assert_eq!(export.username, "admin");
        assert!(export.password.is_none());
    }

    #[test]
    fn env_lookup_treats_empty_as_unset() {
        let env = EnvConfig::from_lookup(|key| match key {
            ENV_BASE_URL => Some("https://shop.example.com".into()),
            ENV_USERNAME => Some(String::new()),
            _ => None,
        });
        assert_eq!(env.base_url.as_deref(), Some("https://shop.example.com"));
        assert!(env.username.is_none());
        assert!(env.password.is_none());
    }

    #[test]
    fn debug_output_hides_password() {
        let env = env(None, Some("admin"), Some("s3cret-pass"));
        let rendered = format!("{:?}", env);
        assert!(!rendered.contains("s3cret-pass"));
        assert!(rendered.contains("has_password: true"));
    }

    #[test]
    fn load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            r#"
            base_url = "https://shop.example.com"
            per_page = 10
            "#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.loaded_from(), Some(path.as_path()));
        assert_eq!(config.file.per_page, Some(10));
    }

    #[test]
    fn load_from_rejects_unknown_keys() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "trunk = \"main\"\n").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn tilde_in_output_dir_expands_to_home() {
        let home = Path::new("/home/exporter");
        assert_eq!(
            expand_home(Path::new("~/exports"), Some(home)),
            PathBuf::from("/home/exporter/exports")
        );
        assert_eq!(expand_home(Path::new("~"), Some(home)), home);
        assert_eq!(
            expand_home(Path::new("~exports/a"), Some(home)),
            PathBuf::from("~exports/a")
        );
        assert_eq!(
            expand_home(Path::new("exports/~"), Some(home)),
            PathBuf::from("exports/~")
        );
        assert_eq!(
            expand_home(Path::new("~/exports"), None),
            PathBuf::from("~/exports")
        );
    }

    #[test]
    fn merge_expands_tilde_from_config_file() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let config = Config {
            file: FileConfig {
                output_dir: Some(PathBuf::from("~/exports")),
                ..Default::default()
            },
            file_path: None,
        };

        let settings = config
            .merge(&EnvConfig::default(), &CliOverrides::default())
            .unwrap();

        assert_eq!(settings.output_dir, home.join("exports"));
        assert_eq!(settings.source("output_dir"), Some(Source::File));
    }

    #[test]
    fn explicit_env_file_must_exist() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.env");
        assert!(matches!(
            load_dotenv(Some(&missing)),
            Err(ConfigError::EnvFile { .. })
        ));
    }
}
