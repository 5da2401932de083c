//! wooflat - Export WooCommerce product categories as a flattened hierarchy
//!
//! wooflat logs in to a WooCommerce store through the JWT auth plugin,
//! fetches every product category page by page, and writes a JSON list in
//! which each category carries a "Parent > Child" label and the slug path
//! from itself up to its root.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, resolves settings)
//! - [`export`] - Export pipeline and JSON file output
//! - [`api`] - Category source abstraction (WooCommerce v3, mock for tests)
//! - [`auth`] - Credentials, bearer tokens, and the JWT token endpoint
//! - [`core`] - Domain types, hierarchy flattening, collation, naming, config
//! - [`ui`] - User interaction utilities
//!
//! # Invariants
//!
//! 1. Flattening never fails; unresolvable categories become orphans
//! 2. Exported entries are sorted by label with locale-aware collation
//! 3. Secrets never appear in `Debug` output or logs
//! 4. Export files are replaced atomically

pub mod api;
pub mod auth;
pub mod cli;
pub mod core;
pub mod export;
pub mod ui;
