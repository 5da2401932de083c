//! ui::prompts
//!
//! Interactive prompts.
//!
//! # Design
//!
//! Prompts are only shown in interactive mode. In non-interactive mode the
//! caller gets [`PromptError::NotInteractive`] and must fail with a message
//! that says which setting to provide instead.

use thiserror::Error;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("not in interactive mode")]
    NotInteractive,

    #[error("input cannot be empty")]
    Empty,

    #[error("failed to read from terminal: {0}")]
    Io(#[from] std::io::Error),
}

/// Prompt for masked input (passwords).
///
/// The input is not echoed to the terminal. Empty input is rejected.
pub fn password(message: &str, interactive: bool) -> Result<String, PromptError> {
    if !interactive {
        return Err(PromptError::NotInteractive);
    }

    let value = rpassword::prompt_password(message)?;
    if value.is_empty() {
        return Err(PromptError::Empty);
    }
    Ok(value)
}
