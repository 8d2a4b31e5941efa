//! HTTP handlers

pub mod authors;
pub mod health;
pub mod quotes;

pub use health::health;

use crate::error::ApiError;

/// Fallback for routes that do not exist
pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}
