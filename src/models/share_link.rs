//! Share link model
//!
//! A share link is a short code that grants read-only access to the list.
//! At most one code is active at a time; revoking keeps the row around
//! with a revoked_at timestamp so old codes stay dead.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

/// A read-only share code for the grocery list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareLink {
    pub id: i64,
    pub code: String,
    pub created_at: String,
    pub revoked_at: Option<String>,
}

impl ShareLink {
    /// Create a ShareLink from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            code: row.get("code")?,
            created_at: row.get("created_at")?,
            revoked_at: row.get("revoked_at")?,
        })
    }

    /// Get the currently active link, if any
    pub fn active(conn: &Connection) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM share_links WHERE revoked_at IS NULL ORDER BY id DESC LIMIT 1"
        )?;

        let result = stmt.query_row([], Self::from_row);
        match result {
            Ok(link) => Ok(Some(link)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Insert a new share link with the given code
    pub fn create(conn: &Connection, code: &str) -> DbResult<Self> {
        conn.execute("INSERT INTO share_links (code) VALUES (?1)", [code])?;

        let id = conn.last_insert_rowid();
        let mut stmt = conn.prepare("SELECT * FROM share_links WHERE id = ?1")?;
        let link = stmt.query_row([id], Self::from_row)?;
        Ok(link)
    }

    /// Look up an active link by its code
    pub fn find_by_code(conn: &Connection, code: &str) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM share_links WHERE code = ?1 AND revoked_at IS NULL"
        )?;

        let result = stmt.query_row([code], Self::from_row);
        match result {
            Ok(link) => Ok(Some(link)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Revoke every active link, returning how many were revoked
    pub fn revoke_active(conn: &Connection) -> DbResult<i64> {
        let rows = conn.execute(
            "UPDATE share_links SET revoked_at = datetime('now') WHERE revoked_at IS NULL",
            [],
        )?;
        Ok(rows as i64)
    }
}
