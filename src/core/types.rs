//! core::types
//!
//! Strong types for the category domain.
//!
//! # Types
//!
//! - [`CategoryId`] - WooCommerce term identifier (`0` marks "no parent")
//! - [`RawCategory`] - A category record as returned by the REST API
//! - [`SlugRef`] - One element of a flattened slug path
//! - [`FlatEntry`] - A display-ready, fully-qualified category
//!
//! # Wire format
//!
//! [`FlatEntry`] serializes to exactly the shape downstream importers expect:
//!
//! ```
//! use wooflat::core::types::{FlatEntry, SlugRef};
//!
//! let entry = FlatEntry {
//!     label: "Clothing > Shirts".to_string(),
//!     value: vec![SlugRef::new("shirts"), SlugRef::new("clothing")],
//! };
//! let json = serde_json::to_string(&entry).unwrap();
//! assert_eq!(
//!     json,
//!     r#"{"label":"Clothing > Shirts","value":[{"slug":"shirts"},{"slug":"clothing"}]}"#
//! );
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a product category.
///
/// The API uses `0` in the `parent` field to mean "top-level category",
/// so `CategoryId::NONE` is never the id of a real category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(u64);

impl CategoryId {
    /// The "no parent" sentinel.
    pub const NONE: CategoryId = CategoryId(0);

    /// Wrap a raw id.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw id.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Check whether this is the "no parent" sentinel.
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CategoryId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A category record as delivered by the categories endpoint.
///
/// Only `id`, `name`, `slug` and `parent` take part in flattening. Every
/// other field the API sends (description, image, count, `_links`, ...)
/// is kept in `extra` so the raw dump reproduces the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCategory {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    #[serde(default = "no_parent")]
    pub parent: CategoryId,
    #[serde(flatten, default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, serde_json::Value>,
}

fn no_parent() -> CategoryId {
    CategoryId::NONE
}

impl RawCategory {
    /// Create a category with no extra fields.
    ///
    /// # Example
    ///
    /// ```
    /// use wooflat::core::types::RawCategory;
    ///
    /// let shirts = RawCategory::new(12, "Shirts", "shirts", 7);
    /// assert!(!shirts.is_top_level());
    /// assert!(RawCategory::new(7, "Clothing", "clothing", 0).is_top_level());
    /// ```
    pub fn new(
        id: u64,
        name: impl Into<String>,
        slug: impl Into<String>,
        parent: u64,
    ) -> Self {
        Self {
            id: CategoryId::new(id),
            name: name.into(),
            slug: slug.into(),
            parent: CategoryId::new(parent),
            extra: BTreeMap::new(),
        }
    }

    /// Whether the category has no parent.
    pub fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }
}

/// One element of a slug path: `{ "slug": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlugRef {
    pub slug: String,
}

impl SlugRef {
    pub fn new(slug: impl Into<String>) -> Self {
        Self { slug: slug.into() }
    }
}

/// A flattened category ready for serialization.
///
/// `label` is the full path joined with `" > "`; `value` lists the slugs
/// from the category itself up to its top-level ancestor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatEntry {
    pub label: String,
    pub value: Vec<SlugRef>,
}

impl FlatEntry {
    /// The slugs of `value` as plain strings.
    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.value.iter().map(|s| s.slug.as_str())
    }
}
