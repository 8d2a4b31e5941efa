//! Storage traits for persistence
//!
//! Implemented by a request-scoped session; writes become visible to other
//! sessions only once the implementor commits.

use crate::Result;
use async_trait::async_trait;
use quotes_types::{Author, NewAuthor, Quote};

/// Author store
#[async_trait]
pub trait AuthorStore: Send {
    /// Insert an author, applying the default surname.
    ///
    /// Fails with [`StoreError::UniqueViolation`](crate::StoreError) when the
    /// name is taken.
    async fn insert_author(&mut self, author: &NewAuthor) -> Result<Author>;
    async fn get_author(&mut self, id: i64) -> Result<Option<Author>>;
    /// All authors in id order.
    async fn list_authors(&mut self) -> Result<Vec<Author>>;
    /// Delete an author together with its quotes. Returns `false` if absent.
    async fn delete_author(&mut self, id: i64) -> Result<bool>;
}

/// Quote store
#[async_trait]
pub trait QuoteStore: Send {
    async fn insert_quote(&mut self, author: &Author, text: &str) -> Result<Quote>;
    async fn get_quote(&mut self, id: i64) -> Result<Option<Quote>>;
    /// All quotes in id order.
    async fn list_quotes(&mut self) -> Result<Vec<Quote>>;
    async fn list_quotes_by_author(&mut self, author_id: i64) -> Result<Vec<Quote>>;
    async fn update_quote(&mut self, quote: &Quote) -> Result<()>;
    /// Returns `false` if the quote does not exist.
    async fn delete_quote(&mut self, id: i64) -> Result<bool>;
}
