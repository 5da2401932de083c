//! api::traits
//!
//! Trait for services that hand out product categories.
//!
//! # Design
//!
//! The trait is async because fetching involves network I/O. The bearer
//! token is an explicit argument of every call; implementations hold no
//! authentication state of their own.
//!
//! # Example
//!
//! ```ignore
//! use wooflat::api::{CategorySource, ApiError};
//! use wooflat::auth::Credentials;
//!
//! async fn first_page(source: &dyn CategorySource) -> Result<(), ApiError> {
//!     let token = source.authenticate(&Credentials::new("admin", "secret")).await?;
//!     let page = source.fetch_page(&token, 1, 100).await?;
//!     println!("{} categories on page 1", page.len());
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use thiserror::Error;

use crate::auth::{AuthError, BearerToken, Credentials};
use crate::core::types::RawCategory;

/// Errors from category source operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Logging in failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The token was refused (expired, insufficient permissions).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The endpoint does not exist (WooCommerce not installed, wrong URL).
    #[error("not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded.
    #[error("rate limited")]
    RateLimited,

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// The response body was not a category list.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Network or connection error.
    #[error("network error: {0}")]
    Network(String),
}

/// A service that lists product categories page by page.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow use across async tasks.
#[async_trait]
pub trait CategorySource: Send + Sync {
    /// Short name for logs (e.g., "woocommerce").
    fn name(&self) -> &'static str;

    /// Exchange credentials for a bearer token.
    async fn authenticate(&self, credentials: &Credentials) -> Result<BearerToken, ApiError>;

    /// Fetch one page of categories. Pages start at 1; an empty page means
    /// there are no more.
    async fn fetch_page(
        &self,
        token: &BearerToken,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<RawCategory>, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_convert_transparently() {
        let err: ApiError = AuthError::TokenMissing.into();
        assert_eq!(err.to_string(), AuthError::TokenMissing.to_string());
    }

    #[test]
    fn api_error_display() {
        let err = ApiError::Api {
            status: 500,
            message: "Internal".into(),
        };
        assert_eq!(err.to_string(), "API error: 500 - Internal");
    }
}
