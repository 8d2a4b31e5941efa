//! Storage layer
//!
//! SQLite (embedded) through sqlx. Handlers never touch the pool directly;
//! each request opens its own [`DbSession`].

pub mod db;
pub mod session;

pub use db::Database;
pub use session::DbSession;
