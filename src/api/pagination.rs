//! api::pagination
//!
//! Walks a [`CategorySource`] page by page until it runs dry.

use super::traits::{ApiError, CategorySource};
use crate::auth::BearerToken;
use crate::core::types::RawCategory;

/// Fetch every category, starting at page 1 and stopping at the first
/// empty page.
///
/// `on_page` is called with the page number before each request, so the
/// caller can report progress.
///
/// # Example
///
/// ```
/// use wooflat::api::fetch_all_categories;
/// use wooflat::api::mock::{MockCategorySource, MOCK_TOKEN};
/// use wooflat::auth::BearerToken;
/// use wooflat::core::types::RawCategory;
///
/// # tokio_test::block_on(async {
/// let source = MockCategorySource::with_pages(vec![
///     vec![RawCategory::new(1, "A", "a", 0)],
///     vec![RawCategory::new(2, "B", "b", 0)],
/// ]);
/// let all = fetch_all_categories(&source, &BearerToken::new(MOCK_TOKEN), 1, |_| {})
///     .await
///     .unwrap();
/// assert_eq!(all.len(), 2);
/// # });
/// ```
pub async fn fetch_all_categories<F>(
    source: &dyn CategorySource,
    token: &BearerToken,
    per_page: u32,
    mut on_page: F,
) -> Result<Vec<RawCategory>, ApiError>
where
    F: FnMut(u32),
{
    let mut categories = Vec::new();
    let mut page = 1;

    loop {
        on_page(page);
        let batch = source.fetch_page(token, page, per_page).await?;
        tracing::debug!(source = source.name(), page, count = batch.len(), "fetched page");

        if batch.is_empty() {
            break;
        }
        categories.extend(batch);
        page += 1;
    }

    Ok(categories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{FailOn, MockCategorySource, MockOperation, MOCK_TOKEN};

    fn token() -> BearerToken {
        BearerToken::new(MOCK_TOKEN)
    }

    #[tokio::test]
    async fn empty_store_fetches_one_page() {
        let source = MockCategorySource::new();
        let all = fetch_all_categories(&source, &token(), 100, |_| {})
            .await
            .unwrap();
        assert!(all.is_empty());
        assert_eq!(source.fetched_pages(), vec![1]);
    }

    #[tokio::test]
    async fn pages_are_concatenated_in_order() {
        let categories: Vec<RawCategory> = (1..=7)
            .map(|i| RawCategory::new(i, format!("C{}", i), format!("c{}", i), 0))
            .collect();
        let source = MockCategorySource::paginated(categories.clone(), 3);

        let mut seen = Vec::new();
        let all = fetch_all_categories(&source, &token(), 3, |page| seen.push(page))
            .await
            .unwrap();

        assert_eq!(all, categories);
        assert_eq!(seen, vec![1, 2, 3, 4]);
        assert_eq!(
            source.operations()[0],
            MockOperation::FetchPage {
                page: 1,
                per_page: 3
            }
        );
    }

    #[tokio::test]
    async fn error_stops_pagination() {
        let source = MockCategorySource::paginated(
            vec![
                RawCategory::new(1, "A", "a", 0),
                RawCategory::new(2, "B", "b", 0),
            ],
            1,
        )
        .fail_on(FailOn::FetchPage(2, ApiError::RateLimited));

        let result = fetch_all_categories(&source, &token(), 1, |_| {}).await;
        assert_eq!(result, Err(ApiError::RateLimited));
        assert_eq!(source.fetched_pages(), vec![1, 2]);
    }
}
