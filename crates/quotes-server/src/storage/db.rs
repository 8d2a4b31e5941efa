//! SQLite database layer (embedded, no external dependencies)

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::session::{store_error, DbSession};

pub struct Database {
    pool: SqlitePool,
    // Serializes write sessions: a deferred WAL transaction that reads and
    // then writes fails with SQLITE_BUSY_SNAPSHOT if another writer
    // committed in between.
    write_gate: Arc<Mutex<()>>,
}

impl Database {
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_url);

        if !database_url.starts_with("sqlite:") {
            return Err(anyhow::anyhow!(
                "Unsupported database URL: {} (only sqlite: URLs are supported)",
                database_url
            ));
        }

        let in_memory = is_in_memory(database_url);

        // Create parent directory if needed
        if let Some(path) = database_file(database_url) {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tracing::info!("Creating parent directory: {}", parent.display());
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create database directory: {}", parent.display())
                })?;
            }
        }

        let mut options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid SQLite database URL: {}", database_url))?
            .create_if_missing(true)
            .foreign_keys(true);
        if !in_memory {
            options = options
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal);
        }

        // An in-memory database lives exactly as long as its connection
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| {
                format!("Failed to connect to SQLite database at: {}", database_url)
            })?;

        tracing::info!("SQLite connection established, creating schema...");

        Self::run_migrations(&pool)
            .await
            .context("Failed to create database schema")?;

        tracing::info!("Database initialization complete");

        Ok(Self {
            pool,
            write_gate: Arc::new(Mutex::new(())),
        })
    }

    /// Private in-memory database, used by tests.
    #[cfg(test)]
    pub async fn in_memory() -> Result<Self> {
        Self::new("sqlite::memory:", 1).await
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        // Authors table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS authors (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name VARCHAR(32) NOT NULL UNIQUE,
                surname VARCHAR(64) NOT NULL DEFAULT 'Иванов'
            )
            "#,
        )
        .execute(pool)
        .await?;

        // Quotes table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS quotes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                author_id INTEGER NOT NULL REFERENCES authors(id) ON DELETE CASCADE,
                text VARCHAR(255) NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_quotes_author_id ON quotes(author_id)
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Open a read-only request-scoped session backed by one transaction.
    ///
    /// Nothing is persisted until [`DbSession::commit`]; dropping the
    /// session rolls it back.
    pub async fn begin(&self) -> quotes_core::Result<DbSession> {
        let tx = self.pool.begin().await.map_err(store_error)?;
        Ok(DbSession::new(tx, None))
    }

    /// Open a session for a request that writes.
    ///
    /// Waits until no other write session is open in this process, so the
    /// session's reads stay valid up to its writes.
    pub async fn begin_write(&self) -> quotes_core::Result<DbSession> {
        let gate = self.write_gate.clone().lock_owned().await;
        let tx = self.pool.begin().await.map_err(store_error)?;
        Ok(DbSession::new(tx, Some(gate)))
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Filesystem path behind a `sqlite:` URL, if any.
fn database_file(database_url: &str) -> Option<PathBuf> {
    if is_in_memory(database_url) {
        return None;
    }
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url);
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() {
        None
    } else {
        Some(PathBuf::from(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio_test::assert_ok;

    #[test]
    fn test_database_file_from_url() {
        assert_eq!(
            database_file("sqlite://data/quotes.db"),
            Some(PathBuf::from("data/quotes.db"))
        );
        assert_eq!(
            database_file("sqlite:quotes.db?mode=rwc"),
            Some(PathBuf::from("quotes.db"))
        );
        assert_eq!(
            database_file("sqlite:///var/lib/quotes/main.db"),
            Some(PathBuf::from("/var/lib/quotes/main.db"))
        );
        assert_eq!(database_file("sqlite::memory:"), None);
        assert_eq!(database_file("sqlite://"), None);
    }

    #[tokio::test]
    async fn test_non_sqlite_urls_rejected() {
        let err = Database::new("postgres://user:pw@localhost/quotes", 5)
            .await
            .err()
            .expect("postgres URL must be rejected");
        assert!(err.to_string().contains("only sqlite: URLs are supported"));
    }

    #[tokio::test]
    async fn test_write_sessions_are_serialized() {
        let db = Database::in_memory().await.unwrap();

        let first = db.begin_write().await.unwrap();
        let blocked = tokio::time::timeout(Duration::from_millis(50), db.begin_write()).await;
        assert!(blocked.is_err());

        first.commit().await.unwrap();
        let second = assert_ok!(
            tokio::time::timeout(Duration::from_secs(5), db.begin_write()).await
        );
        assert_ok!(second);
    }

    #[tokio::test]
    async fn test_schema_creation_is_idempotent() {
        let db = Database::in_memory().await.unwrap();
        assert_ok!(Database::run_migrations(&db.pool).await);
    }
}
