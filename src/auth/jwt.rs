//! auth::jwt
//!
//! Client for the JWT Authentication token endpoint.
//!
//! # Protocol
//!
//! `POST <store>/wp-json/jwt-auth/v1/token` with a JSON body
//! `{"username": ..., "password": ...}`. A successful response carries the
//! token in `token`, alongside some user details that are ignored. Failures
//! come back as `{"code": ..., "message": ..., "data": {"status": ...}}`.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use super::errors::AuthError;
use super::{BearerToken, Credentials};

/// Path of the token endpoint, relative to the store URL.
pub const TOKEN_PATH: &str = "/wp-json/jwt-auth/v1/token";

/// User-Agent header for auth requests.
const USER_AGENT: &str = "wooflat-cli";

/// Request body for the token endpoint.
#[derive(Serialize)]
struct TokenRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Successful token response.
#[derive(Deserialize)]
struct TokenResponse {
    token: Option<String>,
}

/// Error response from the plugin.
#[derive(Debug, Deserialize)]
struct JwtErrorResponse {
    #[serde(default)]
    message: String,
}

/// Client for the token endpoint.
#[derive(Debug, Clone)]
pub struct JwtAuthClient {
    /// HTTP client.
    client: Client,

    /// Store URL without trailing slash.
    base_url: String,
}

impl JwtAuthClient {
    /// Create a client for a store.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client sharing an existing HTTP client.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Get the token endpoint URL.
    pub fn token_url(&self) -> String {
        format!("{}{}", self.base_url, TOKEN_PATH)
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            reqwest::header::USER_AGENT,
            HeaderValue::from_static(USER_AGENT),
        );
        headers
    }

    /// Exchange credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Rejected`] if the store refuses the credentials (401/403)
    /// - [`AuthError::TokenMissing`] if the response has no token
    /// - [`AuthError::Endpoint`] for any other non-success status
    /// - [`AuthError::Network`] if the request cannot be sent
    pub async fn request_token(&self, credentials: &Credentials) -> Result<BearerToken, AuthError> {
        let request = TokenRequest {
            username: credentials.username(),
            password: credentials.password(),
        };

        tracing::debug!(url = %self.token_url(), username = credentials.username(), "requesting token");

        let response = self
            .client
            .post(self.token_url())
            .headers(self.headers())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            let token = serde_json::from_str::<TokenResponse>(&body)
                .ok()
                .and_then(|r| r.token)
                .filter(|t| !t.is_empty())
                .ok_or(AuthError::TokenMissing)?;
            return Ok(BearerToken::new(token));
        }

        let message = serde_json::from_str::<JwtErrorResponse>(&body)
            .map(|e| e.message)
            .unwrap_or_default();

        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AuthError::Rejected {
                status: status.as_u16(),
                message,
            },
            _ => AuthError::Endpoint {
                status: status.as_u16(),
                message,
            },
        })
    }
}
