//! core
//!
//! Core domain types and pure logic for wooflat.
//!
//! # Modules
//!
//! - [`types`] - Strong types: CategoryId, RawCategory, FlatEntry
//! - [`hierarchy`] - Fixed-point flattening of the category tree
//! - [`collate`] - Locale-aware label ordering
//! - [`naming`] - Export file naming
//! - [`config`] - Configuration schema, loading, and layering
//!
//! # Design Principles
//!
//! - Nothing here performs network I/O
//! - Schemas are strict and self-describing
//! - Flattening and ordering are deterministic

pub mod collate;
pub mod config;
pub mod hierarchy;
pub mod naming;
pub mod types;
