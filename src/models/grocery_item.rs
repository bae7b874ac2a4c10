//! Grocery item model
//!
//! A single line on the shared shopping list.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

/// An item on the grocery list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroceryItem {
    pub id: i64,
    pub name: String,
    pub checked: bool,
    pub from_recipe: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for creating a new grocery item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroceryItemCreate {
    pub name: String,
    pub from_recipe: Option<String>,
}

impl GroceryItem {
    /// Create a GroceryItem from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            checked: row.get("checked")?,
            from_recipe: row.get("from_recipe")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Insert a new item onto the list
    pub fn create(conn: &Connection, data: &GroceryItemCreate) -> DbResult<Self> {
        conn.execute(
            "INSERT INTO grocery_items (name, from_recipe) VALUES (?1, ?2)",
            params![data.name, data.from_recipe],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    /// Get an item by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM grocery_items WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(item) => Ok(Some(item)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List all items in the order they were added
    pub fn list(conn: &Connection) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM grocery_items ORDER BY created_at ASC, id ASC"
        )?;

        let items = stmt
            .query_map([], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(items)
    }

    /// Check whether an unchecked item with this name is already on the list
    pub fn exists_unchecked(conn: &Connection, name: &str) -> DbResult<bool> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM grocery_items WHERE checked = 0 AND LOWER(name) = LOWER(?1)",
            [name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Flip the checked state of an item
    pub fn toggle(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let rows = conn.execute(
            "UPDATE grocery_items SET checked = 1 - checked, updated_at = datetime('now') WHERE id = ?1",
            [id],
        )?;
        if rows == 0 {
            return Ok(None);
        }
        Self::get_by_id(conn, id)
    }

    /// Rename an item (used when merged duplicates get a summed quantity)
    pub fn rename(conn: &Connection, id: i64, new_name: &str) -> DbResult<bool> {
        let rows = conn.execute(
            "UPDATE grocery_items SET name = ?1, updated_at = datetime('now') WHERE id = ?2",
            params![new_name, id],
        )?;
        Ok(rows > 0)
    }

    /// Delete an item
    /// Returns Ok(true) if deleted, Ok(false) if not found
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM grocery_items WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }

    /// Delete all checked items, returning how many were removed
    pub fn clear_checked(conn: &Connection) -> DbResult<i64> {
        let rows = conn.execute("DELETE FROM grocery_items WHERE checked = 1", [])?;
        Ok(rows as i64)
    }

    /// Delete every item on the list, returning how many were removed
    pub fn clear_all(conn: &Connection) -> DbResult<i64> {
        let rows = conn.execute("DELETE FROM grocery_items", [])?;
        Ok(rows as i64)
    }
}
