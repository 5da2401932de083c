//! api::woocommerce
//!
//! WooCommerce REST implementation of [`CategorySource`].
//!
//! # Endpoints
//!
//! - Login: `POST /wp-json/jwt-auth/v1/token` (see [`crate::auth`])
//! - Categories: `GET /wp-json/wc/v3/products/categories?per_page=N&page=P`
//!
//! # Example
//!
//! ```ignore
//! use wooflat::api::{CategorySource, WooCommerceClient};
//! use wooflat::auth::Credentials;
//!
//! let client = WooCommerceClient::new("https://shop.example.com");
//! let token = client.authenticate(&Credentials::new("admin", "secret")).await?;
//! let first = client.fetch_page(&token, 1, 100).await?;
//! ```

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;

use super::traits::{ApiError, CategorySource};
use crate::auth::{BearerToken, Credentials, JwtAuthClient};
use crate::core::types::RawCategory;

/// Path of the categories endpoint, relative to the store URL.
pub const CATEGORIES_PATH: &str = "/wp-json/wc/v3/products/categories";

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = "wooflat-cli";

/// WooCommerce store client.
#[derive(Debug, Clone)]
pub struct WooCommerceClient {
    /// HTTP client for making requests
    client: Client,
    /// Token endpoint client sharing `client`
    auth: JwtAuthClient,
    /// Store URL without trailing slash
    base_url: String,
}

/// Error body returned by the WordPress REST API.
#[derive(Debug, Deserialize)]
struct WpErrorResponse {
    #[serde(default)]
    message: String,
}

impl WooCommerceClient {
    /// Create a client for a store.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::new();
        Self {
            auth: JwtAuthClient::with_client(client.clone(), base_url.clone()),
            client,
            base_url,
        }
    }

    /// Get the store URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the categories endpoint URL.
    pub fn categories_url(&self) -> String {
        format!("{}{}", self.base_url, CATEGORIES_PATH)
    }

    /// Build headers for an authenticated request.
    fn headers(&self, token: &BearerToken) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&token.header_value())
            .map_err(|_| ApiError::AuthFailed("token contains invalid characters".into()))?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        Ok(headers)
    }

    /// Handle API response, mapping errors appropriately.
    async fn handle_response(&self, response: Response) -> Result<Vec<RawCategory>, ApiError> {
        let status = response.status();

        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()));
        }

        let message = match response.json::<WpErrorResponse>().await {
            Ok(err) if !err.message.is_empty() => err.message,
            _ => "Unknown error".to_string(),
        };

        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::AuthFailed(message),
            StatusCode::NOT_FOUND => ApiError::NotFound(message),
            StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited,
            _ if status.is_server_error() => ApiError::Api {
                status: status.as_u16(),
                message: format!("store server error: {}", message),
            },
            _ => ApiError::Api {
                status: status.as_u16(),
                message,
            },
        })
    }
}

#[async_trait]
impl CategorySource for WooCommerceClient {
    fn name(&self) -> &'static str {
        "woocommerce"
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<BearerToken, ApiError> {
        Ok(self.auth.request_token(credentials).await?)
    }

    async fn fetch_page(
        &self,
        token: &BearerToken,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<RawCategory>, ApiError> {
        let response = self
            .client
            .get(self.categories_url())
            .headers(self.headers(token)?)
            .query(&[("per_page", per_page), ("page", page)])
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        self.handle_response(response).await
    }
}
