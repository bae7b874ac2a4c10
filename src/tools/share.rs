//! Share link MCP tools
//!
//! A share code gives read-only access to the household's list. One code is
//! active at a time; creating is idempotent and revoking kills the code for
//! good.

use rand::{distributions::Alphanumeric, Rng};
use serde::Serialize;

use crate::db::Database;
use crate::models::{GroceryItem, Recipe, ShareLink, UsualItem};
use crate::route::{sort_by_store_route, RouteGroup};

use super::recipes::RecipeSummary;

/// Length of generated share codes
const SHARE_CODE_LEN: usize = 10;

/// Response for create_share_link
#[derive(Debug, Serialize)]
pub struct ShareLinkResponse {
    pub code: String,
    /// False when an active code already existed and was returned as-is
    pub created: bool,
    pub created_at: String,
}

/// Response for revoke_share_link
#[derive(Debug, Serialize)]
pub struct RevokeShareResponse {
    pub revoked: i64,
}

/// Read-only snapshot returned for a valid share code
#[derive(Debug, Serialize)]
pub struct SharedListResponse {
    pub items: Vec<GroceryItem>,
    /// Unchecked items grouped by store section
    pub route: Vec<RouteGroup<GroceryItem>>,
    pub usuals: Vec<UsualItem>,
    pub recipes: Vec<RecipeSummary>,
}

/// Generate a new share code
fn generate_code() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SHARE_CODE_LEN)
        .map(char::from)
        .collect()
}

/// Return the active share code, creating one when none exists
pub fn create_share_link(db: &Database) -> Result<ShareLinkResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let existing = ShareLink::active(&conn)
        .map_err(|e| format!("Failed to look up share link: {}", e))?;

    if let Some(link) = existing {
        return Ok(ShareLinkResponse {
            code: link.code,
            created: false,
            created_at: link.created_at,
        });
    }

    let code = generate_code();
    let link = ShareLink::create(&conn, &code)
        .map_err(|e| format!("Failed to create share link: {}", e))?;

    tracing::info!("Created share link {}", link.code);

    Ok(ShareLinkResponse {
        code: link.code,
        created: true,
        created_at: link.created_at,
    })
}

/// Fetch the list snapshot for a share code
pub fn get_shared_list(db: &Database, code: &str) -> Result<Option<SharedListResponse>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let link = ShareLink::find_by_code(&conn, code.trim())
        .map_err(|e| format!("Failed to look up share link: {}", e))?;

    if link.is_none() {
        return Ok(None);
    }

    let items = GroceryItem::list(&conn).map_err(|e| format!("Failed to list items: {}", e))?;
    let unchecked: Vec<GroceryItem> = items.iter().filter(|i| !i.checked).cloned().collect();
    let route = sort_by_store_route(unchecked);

    let usuals = UsualItem::list(&conn).map_err(|e| format!("Failed to list usuals: {}", e))?;

    let recipes = Recipe::list(&conn, None)
        .map_err(|e| format!("Failed to list recipes: {}", e))?
        .into_iter()
        .map(|recipe| RecipeSummary {
            id: recipe.id,
            name: recipe.name,
            description: recipe.description,
            servings: recipe.servings,
            ingredient_count: recipe.ingredients.len(),
            has_macros: recipe.macros.is_some(),
            created_at: recipe.created_at,
        })
        .collect();

    Ok(Some(SharedListResponse {
        items,
        route,
        usuals,
        recipes,
    }))
}

/// Revoke the active share code
pub fn revoke_share_link(db: &Database) -> Result<RevokeShareResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let revoked = ShareLink::revoke_active(&conn)
        .map_err(|e| format!("Failed to revoke share link: {}", e))?;

    if revoked > 0 {
        tracing::info!("Revoked {} share link(s)", revoked);
    }

    Ok(RevokeShareResponse { revoked })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations;
    use crate::tools::{groceries, usuals};

    fn test_db(name: &str) -> Database {
        let uri = format!("file:{}?mode=memory&cache=shared", name);
        let db = Database::new(uri).unwrap();
        db.with_conn(|conn| migrations::run_migrations(conn)).unwrap();
        db
    }

    #[test]
    fn test_generated_codes_are_alphanumeric() {
        let code = generate_code();
        assert_eq!(code.len(), SHARE_CODE_LEN);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_create_share_link_is_idempotent() {
        let db = test_db("ugm_test_share_idempotent");

        let first = create_share_link(&db).unwrap();
        assert!(first.created);
        assert_eq!(first.code.len(), SHARE_CODE_LEN);

        let second = create_share_link(&db).unwrap();
        assert!(!second.created);
        assert_eq!(second.code, first.code);
    }

    #[test]
    fn test_shared_snapshot_and_revoke() {
        let db = test_db("ugm_test_share_snapshot");

        let link = create_share_link(&db).unwrap();

        groceries::add_grocery_item(&db, "melk", None).unwrap();
        let bought = groceries::add_grocery_item(&db, "kaas", None).unwrap();
        groceries::toggle_grocery_item(&db, bought.id).unwrap();
        usuals::add_usual(&db, "boter").unwrap();

        let snapshot = get_shared_list(&db, &link.code).unwrap().unwrap();
        assert_eq!(snapshot.items.len(), 2);
        assert_eq!(snapshot.usuals.len(), 1);
        // Route only carries unchecked items
        let routed: usize = snapshot.route.iter().map(|g| g.items.len()).sum();
        assert_eq!(routed, 1);

        // Codes are trimmed before lookup
        let padded = format!("  {}  ", link.code);
        assert!(get_shared_list(&db, &padded).unwrap().is_some());
        assert!(get_shared_list(&db, "nosuchcode").unwrap().is_none());

        let revoked = revoke_share_link(&db).unwrap();
        assert_eq!(revoked.revoked, 1);
        assert!(get_shared_list(&db, &link.code).unwrap().is_none());

        // A fresh link gets a new code
        let fresh = create_share_link(&db).unwrap();
        assert!(fresh.created);
        assert_ne!(fresh.code, link.code);
    }
}
