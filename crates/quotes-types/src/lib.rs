//! Quotes Types - Pure type definitions
//!
//! Records, request payloads and response bodies shared by the storage
//! layer and the HTTP server. No async runtime dependencies.

pub mod author;
pub mod message;
pub mod quote;

pub use author::*;
pub use message::*;
pub use quote::*;

use thiserror::Error;

/// Rejected request payload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{0}' must not be blank")]
    BlankField(&'static str),
}

/// Reject values that are empty after trimming.
pub(crate) fn require_non_blank(
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    Ok(())
}
