//! api::mock
//!
//! In-memory category source for deterministic testing.
//!
//! # Design
//!
//! The mock serves a fixed list of pages. Any page past the end is empty,
//! which is how the real API signals the end of the list. Every call is
//! recorded, and a single failure can be injected.
//!
//! # Example
//!
//! ```
//! use wooflat::api::mock::MockCategorySource;
//! use wooflat::api::CategorySource;
//! use wooflat::auth::Credentials;
//! use wooflat::core::types::RawCategory;
//!
//! # tokio_test::block_on(async {
//! let source = MockCategorySource::with_pages(vec![
//!     vec![RawCategory::new(1, "Books", "books", 0)],
//! ]);
//!
//! let token = source.authenticate(&Credentials::new("admin", "pw")).await.unwrap();
//! assert_eq!(source.fetch_page(&token, 1, 100).await.unwrap().len(), 1);
//! assert!(source.fetch_page(&token, 2, 100).await.unwrap().is_empty());
//! # });
//! ```

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::traits::{ApiError, CategorySource};
use crate::auth::{AuthError, BearerToken, Credentials};
use crate::core::types::RawCategory;

/// Token the mock hands out.
pub const MOCK_TOKEN: &str = "mock-token";

/// Mock category source for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping.
#[derive(Debug, Clone)]
pub struct MockCategorySource {
    inner: Arc<Mutex<MockInner>>,
}

#[derive(Debug)]
struct MockInner {
    pages: Vec<Vec<RawCategory>>,
    /// Password the mock accepts; any password when `None`.
    password: Option<String>,
    fail_on: Option<FailOn>,
    operations: Vec<MockOperation>,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail authenticate with the given error.
    Authenticate(ApiError),
    /// Fail fetching the given page with the given error.
    FetchPage(u32, ApiError),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    Authenticate { username: String },
    FetchPage { page: u32, per_page: u32 },
}

impl MockCategorySource {
    /// Create a mock with no categories.
    pub fn new() -> Self {
        Self::with_pages(Vec::new())
    }

    /// Create a mock serving the given pages in order.
    pub fn with_pages(pages: Vec<Vec<RawCategory>>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockInner {
                pages,
                password: None,
                fail_on: None,
                operations: Vec::new(),
            })),
        }
    }

    /// Create a mock serving `categories` split into pages of `per_page`.
    pub fn paginated(categories: Vec<RawCategory>, per_page: usize) -> Self {
        let pages = categories
            .chunks(per_page.max(1))
            .map(|chunk| chunk.to_vec())
            .collect();
        Self::with_pages(pages)
    }

    /// Only accept this password.
    pub fn require_password(self, password: impl Into<String>) -> Self {
        self.inner.lock().unwrap().password = Some(password.into());
        self
    }

    /// Configure the mock to fail on a specific operation.
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        self.inner.lock().unwrap().fail_on = Some(fail_on);
        self
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.inner.lock().unwrap().operations.clone()
    }

    /// Pages requested so far, in order.
    pub fn fetched_pages(&self) -> Vec<u32> {
        self.operations()
            .into_iter()
            .filter_map(|op| match op {
                MockOperation::FetchPage { page, .. } => Some(page),
                MockOperation::Authenticate { .. } => None,
            })
            .collect()
    }
}

impl Default for MockCategorySource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CategorySource for MockCategorySource {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<BearerToken, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(MockOperation::Authenticate {
            username: credentials.username().to_string(),
        });

        if let Some(FailOn::Authenticate(err)) = &inner.fail_on {
            return Err(err.clone());
        }
        if let Some(expected) = &inner.password {
            if expected != credentials.password() {
                return Err(AuthError::Rejected {
                    status: 403,
                    message: "Incorrect password.".into(),
                }
                .into());
            }
        }
        Ok(BearerToken::new(MOCK_TOKEN))
    }

    async fn fetch_page(
        &self,
        token: &BearerToken,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<RawCategory>, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(MockOperation::FetchPage { page, per_page });

        if let Some(FailOn::FetchPage(failing, err)) = &inner.fail_on {
            if *failing == page {
                return Err(err.clone());
            }
        }
        if token.expose() != MOCK_TOKEN {
            return Err(ApiError::AuthFailed("invalid token".into()));
        }

        if page == 0 {
            return Ok(Vec::new());
        }
        Ok(inner
            .pages
            .get(page as usize - 1)
            .cloned()
            .unwrap_or_default())
    }
}
