//! Request-scoped storage session

use async_trait::async_trait;
use quotes_core::{Author, AuthorStore, NewAuthor, Quote, QuoteStore, StoreError};
use sqlx::{Sqlite, Transaction};
use tokio::sync::OwnedMutexGuard;

/// One SQL transaction, owned by a single request
///
/// Write sessions also hold the database write gate until they are
/// committed, rolled back or dropped. `tx` is declared first so the
/// transaction ends before the gate is released.
pub struct DbSession {
    tx: Transaction<'static, Sqlite>,
    _write_gate: Option<OwnedMutexGuard<()>>,
}

impl DbSession {
    pub(super) fn new(
        tx: Transaction<'static, Sqlite>,
        write_gate: Option<OwnedMutexGuard<()>>,
    ) -> Self {
        Self {
            tx,
            _write_gate: write_gate,
        }
    }

    pub async fn commit(self) -> quotes_core::Result<()> {
        self.tx.commit().await.map_err(store_error)
    }

    pub async fn rollback(self) -> quotes_core::Result<()> {
        self.tx.rollback().await.map_err(store_error)
    }
}

pub(super) fn store_error(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = e {
        if db_err.is_unique_violation() {
            return StoreError::UniqueViolation(db_err.message().to_string());
        }
        if db_err.is_foreign_key_violation() {
            return StoreError::ForeignKeyViolation(db_err.message().to_string());
        }
    }
    StoreError::Database(e.to_string())
}

#[async_trait]
impl AuthorStore for DbSession {
    async fn insert_author(&mut self, author: &NewAuthor) -> quotes_core::Result<Author> {
        let surname = author.surname_or_default();

        let id = sqlx::query(
            r#"
            INSERT INTO authors (name, surname)
            VALUES (?1, ?2)
            "#,
        )
        .bind(&author.name)
        .bind(surname)
        .execute(&mut *self.tx)
        .await
        .map_err(store_error)?
        .last_insert_rowid();

        Ok(Author {
            id,
            name: author.name.clone(),
            surname: surname.to_string(),
        })
    }

    async fn get_author(&mut self, id: i64) -> quotes_core::Result<Option<Author>> {
        let row: Option<AuthorRow> = sqlx::query_as(
            r#"
            SELECT id, name, surname FROM authors WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(store_error)?;

        Ok(row.map(|r| r.into()))
    }

    async fn list_authors(&mut self) -> quotes_core::Result<Vec<Author>> {
        let rows: Vec<AuthorRow> = sqlx::query_as(
            r#"
            SELECT id, name, surname FROM authors ORDER BY id
            "#,
        )
        .fetch_all(&mut *self.tx)
        .await
        .map_err(store_error)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn delete_author(&mut self, id: i64) -> quotes_core::Result<bool> {
        // Quotes go with it (ON DELETE CASCADE)
        let result = sqlx::query(
            r#"
            DELETE FROM authors WHERE id = ?1
            "#,
        )
        .bind(id)
        .execute(&mut *self.tx)
        .await
        .map_err(store_error)?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl QuoteStore for DbSession {
    async fn insert_quote(&mut self, author: &Author, text: &str) -> quotes_core::Result<Quote> {
        let id = sqlx::query(
            r#"
            INSERT INTO quotes (author_id, text)
            VALUES (?1, ?2)
            "#,
        )
        .bind(author.id)
        .bind(text)
        .execute(&mut *self.tx)
        .await
        .map_err(store_error)?
        .last_insert_rowid();

        Ok(Quote {
            id,
            author_id: author.id,
            text: text.to_string(),
        })
    }

    async fn get_quote(&mut self, id: i64) -> quotes_core::Result<Option<Quote>> {
        let row: Option<QuoteRow> = sqlx::query_as(
            r#"
            SELECT id, author_id, text FROM quotes WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(store_error)?;

        Ok(row.map(|r| r.into()))
    }

    async fn list_quotes(&mut self) -> quotes_core::Result<Vec<Quote>> {
        let rows: Vec<QuoteRow> = sqlx::query_as(
            r#"
            SELECT id, author_id, text FROM quotes ORDER BY id
            "#,
        )
        .fetch_all(&mut *self.tx)
        .await
        .map_err(store_error)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn list_quotes_by_author(&mut self, author_id: i64) -> quotes_core::Result<Vec<Quote>> {
        let rows: Vec<QuoteRow> = sqlx::query_as(
            r#"
            SELECT id, author_id, text FROM quotes
            WHERE author_id = ?1
            ORDER BY id
            "#,
        )
        .bind(author_id)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(store_error)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn update_quote(&mut self, quote: &Quote) -> quotes_core::Result<()> {
        sqlx::query(
            r#"
            UPDATE quotes SET author_id = ?1, text = ?2
            WHERE id = ?3
            "#,
        )
        .bind(quote.author_id)
        .bind(&quote.text)
        .bind(quote.id)
        .execute(&mut *self.tx)
        .await
        .map_err(store_error)?;

        Ok(())
    }

    async fn delete_quote(&mut self, id: i64) -> quotes_core::Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM quotes WHERE id = ?1
            "#,
        )
        .bind(id)
        .execute(&mut *self.tx)
        .await
        .map_err(store_error)?;

        Ok(result.rows_affected() > 0)
    }
}

// Helper structs for sqlx query_as
#[derive(sqlx::FromRow)]
struct AuthorRow {
    id: i64,
    name: String,
    surname: String,
}

impl From<AuthorRow> for Author {
    fn from(r: AuthorRow) -> Self {
        Author {
            id: r.id,
            name: r.name,
            surname: r.surname,
        }
    }
}

#[derive(sqlx::FromRow)]
struct QuoteRow {
    id: i64,
    author_id: i64,
    text: String,
}

impl From<QuoteRow> for Quote {
    fn from(r: QuoteRow) -> Self {
        Quote {
            id: r.id,
            author_id: r.author_id,
            text: r.text,
        }
    }
}
