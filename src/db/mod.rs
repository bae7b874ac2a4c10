//! Database module
//!
//! Pooled SQLite access and schema migrations for the grocery database.

pub mod connection;
pub mod migrations;

pub use connection::{Database, DbError, DbResult};
