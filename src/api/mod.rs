//! api
//!
//! Abstraction over services that list product categories.
//!
//! # Architecture
//!
//! The [`CategorySource`] trait defines the two calls an export needs:
//! logging in and fetching one page. Commands drive pagination through
//! [`fetch_all_categories`] and never talk HTTP themselves.
//!
//! # Modules
//!
//! - `traits`: Core `CategorySource` trait and `ApiError`
//! - [`woocommerce`]: WooCommerce REST implementation
//! - [`mock`]: In-memory implementation for deterministic testing
//! - `pagination`: Page-by-page fetch loop

pub mod mock;
mod pagination;
mod traits;
pub mod woocommerce;

pub use pagination::fetch_all_categories;
pub use traits::*;
pub use woocommerce::WooCommerceClient;
