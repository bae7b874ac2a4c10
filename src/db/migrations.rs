//! Database migrations
//!
//! Schema creation and migration logic.

use rusqlite::Connection;

use super::connection::DbResult;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Run all migrations to bring the database up to the current schema version
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    // Create migrations table if it doesn't exist
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    // Get current version
    let current_version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    // Run migrations
    if current_version < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
    }

    Ok(())
}

/// Migration v1: Initial schema
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- GROCERY ITEMS
        -- The shared shopping list
        -- ============================================
        CREATE TABLE grocery_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            checked INTEGER NOT NULL DEFAULT 0,  -- boolean
            from_recipe TEXT,                    -- nullable, name of the recipe the item came from

            -- Metadata
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_grocery_items_checked ON grocery_items(checked);
        CREATE INDEX idx_grocery_items_created ON grocery_items(created_at);

        -- ============================================
        -- RECIPES
        -- Free-text ingredient lines with an optional
        -- macro estimate for the whole recipe
        -- ============================================
        CREATE TABLE recipes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            ingredients TEXT NOT NULL DEFAULT '[]', -- JSON array of ingredient strings
            instructions TEXT,
            image_url TEXT,
            source_url TEXT,
            servings REAL NOT NULL DEFAULT 4.0,     -- base serving count for scaling

            -- Macro estimate (whole numbers; all five set together or all NULL)
            macros_calories INTEGER,                -- kcal
            macros_protein INTEGER,                 -- grams
            macros_carbs INTEGER,                   -- grams
            macros_fat INTEGER,                     -- grams
            macros_fiber INTEGER,                   -- grams

            -- Metadata
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_recipes_name ON recipes(name);
        CREATE INDEX idx_recipes_created ON recipes(created_at);

        -- ============================================
        -- USUALS
        -- Frequently bought staples, one tap to re-add
        -- ============================================
        CREATE TABLE usuals (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_usuals_name ON usuals(name);

        -- ============================================
        -- SHARE LINKS
        -- Read-only access codes for the list
        -- ============================================
        CREATE TABLE share_links (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            code TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            revoked_at TEXT                         -- NULL while the code is active
        );
        "#,
    )?;

    Ok(())
}

/// Get the current schema version
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);
    Ok(version)
}

/// Check if the database needs migration
pub fn needs_migration(conn: &Connection) -> DbResult<bool> {
    let current = get_schema_version(conn)?;
    Ok(current < SCHEMA_VERSION)
}
