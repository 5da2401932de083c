//! auth - JWT authentication against the store
//!
//! The store exposes the JWT Authentication plugin endpoint
//! `/wp-json/jwt-auth/v1/token`. A login exchanges [`Credentials`] for a
//! [`BearerToken`], which is then passed explicitly to every API call.
//! Nothing is stored between runs.
//!
//! # Security
//!
//! Passwords and tokens never appear in logs, errors, or debug output. Both
//! types implement a redacting `Debug`.
//!
//! # Example
//!
//! ```ignore
//! use wooflat::auth::{Credentials, JwtAuthClient};
//!
//! let client = JwtAuthClient::new("https://shop.example.com");
//! let token = client.request_token(&Credentials::new("admin", "secret")).await?;
//! ```

mod errors;
mod jwt;

pub use errors::AuthError;
pub use jwt::{JwtAuthClient, TOKEN_PATH};

use std::fmt;

/// Login credentials for the store.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

// Custom Debug to avoid exposing the password
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// An access token issued by the store.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token value.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    ///
    /// # Example
    ///
    /// ```
    /// use wooflat::auth::BearerToken;
    ///
    /// assert_eq!(BearerToken::new("abc").header_value(), "Bearer abc");
    /// ```
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

// Custom Debug to avoid exposing the token
impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_debug_redacts_password() {
        let creds = Credentials::new("admin", "p@ssw0rd-123");
        let rendered = format!("{:?}", creds);
        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("p@ssw0rd-123"));
    }

    #[test]
    fn token_debug_redacts_value() {
        let token = BearerToken::new("eyJhbGciOiJIUzI1NiJ9.secret");
        assert_eq!(format!("{:?}", token), "BearerToken([REDACTED])");
        assert_eq!(token.expose(), "eyJhbGciOiJIUzI1NiJ9.secret");
    }
}
