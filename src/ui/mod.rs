//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`prompts`] - Masked password prompt
//! - [`output`] - Progress, warning, and error display
//!
//! # Design
//!
//! All user-facing output and prompts go through this module so quiet mode
//! and non-interactive mode are honored in one place. Diagnostics for
//! developers go through `tracing` instead.

pub mod output;
pub mod prompts;
