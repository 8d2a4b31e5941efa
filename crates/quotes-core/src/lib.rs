//! Quotes Core Library
//!
//! Domain types and storage ports for the quotes service.

// Re-export pure types from quotes-types
pub use quotes_types::*;

pub mod error;
pub mod ports;

pub use error::{Result, StoreError};
pub use ports::{AuthorStore, QuoteStore};
