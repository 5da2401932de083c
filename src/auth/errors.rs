//! auth::errors
//!
//! Authentication error types.
//!
//! # Design
//!
//! Error messages never contain the password or the issued token.
//!
//! # Example
//!
//! ```
//! use wooflat::auth::AuthError;
//!
//! let err = AuthError::Rejected {
//!     status: 403,
//!     message: "Incorrect password.".to_string(),
//! };
//! assert!(err.to_string().contains("403"));
//! ```

use thiserror::Error;

/// Errors from requesting a token.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The store refused the credentials.
    #[error("login rejected ({status}): {message}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Error message from the store
        message: String,
    },

    /// The store answered but the response carried no token.
    #[error("could not obtain an access token from the store")]
    TokenMissing,

    /// Unexpected HTTP status from the token endpoint.
    #[error("token endpoint error: {status} - {message}")]
    Endpoint {
        /// HTTP status code
        status: u16,
        /// Error message from the store
        message: String,
    },

    /// Network error during authentication.
    #[error("network error: {0}")]
    Network(String),
}

impl AuthError {
    /// Check if this error means the credentials themselves are wrong.
    ///
    /// # Example
    ///
    /// ```
    /// use wooflat::auth::AuthError;
    ///
    /// assert!(AuthError::Rejected { status: 401, message: String::new() }.is_bad_credentials());
    /// assert!(!AuthError::Network("timeout".into()).is_bad_credentials());
    /// ```
    pub fn is_bad_credentials(&self) -> bool {
        matches!(self, AuthError::Rejected { .. })
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        AuthError::Network(err.to_string())
    }
}
