//! Grocery list MCP tools
//!
//! Tools for the shared shopping list: adding and checking off items,
//! walking the store route, merging duplicates, and pulling recipe
//! ingredients onto the list.

use serde::Serialize;

use crate::db::Database;
use crate::models::{GroceryItem, GroceryItemCreate, Recipe};
use crate::quantity::{merge_duplicates, scale_ingredient, DecimalSeparator, MergeCandidate, Rename};
use crate::route::{categorize, sort_by_store_route, RouteCategory, RouteGroup};

/// Response for add_grocery_item
#[derive(Debug, Serialize)]
pub struct AddItemResponse {
    pub id: i64,
    pub name: String,
    pub category: RouteCategory,
    pub category_label: &'static str,
    pub created_at: String,
}

/// Response for list_grocery_items
#[derive(Debug, Serialize)]
pub struct GroceryListResponse {
    pub items: Vec<GroceryItem>,
    pub total: usize,
    pub unchecked: usize,
    pub checked: usize,
}

/// Response for get_store_route
#[derive(Debug, Serialize)]
pub struct StoreRouteResponse {
    pub groups: Vec<RouteGroup<GroceryItem>>,
    pub total_items: usize,
}

/// Response for clear_checked_items / clear_all_items
#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub removed: i64,
}

/// Response for merge_duplicate_items
#[derive(Debug, Serialize)]
pub struct MergeResponse {
    pub duplicates_removed: usize,
    pub items_renamed: usize,
    pub renamed: Vec<Rename>,
    pub remaining_items: usize,
}

/// Response for add_recipe_to_grocery_list
#[derive(Debug, Serialize)]
pub struct AddRecipeToListResponse {
    pub recipe: String,
    pub multiplier: f64,
    pub added: Vec<String>,
    pub skipped: Vec<String>,
}

// ============================================================================
// List Tools
// ============================================================================

/// Add an item to the grocery list
pub fn add_grocery_item(
    db: &Database,
    name: &str,
    from_recipe: Option<String>,
) -> Result<AddItemResponse, String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Item name cannot be empty".to_string());
    }

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let item = GroceryItem::create(
        &conn,
        &GroceryItemCreate {
            name: name.to_string(),
            from_recipe,
        },
    )
    .map_err(|e| format!("Failed to add item: {}", e))?;

    let category = categorize(&item.name);

    Ok(AddItemResponse {
        id: item.id,
        name: item.name,
        category,
        category_label: category.label(),
        created_at: item.created_at,
    })
}

/// List all grocery items in the order they were added
pub fn list_grocery_items(db: &Database) -> Result<GroceryListResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let items = GroceryItem::list(&conn).map_err(|e| format!("Failed to list items: {}", e))?;

    let checked = items.iter().filter(|i| i.checked).count();

    Ok(GroceryListResponse {
        total: items.len(),
        unchecked: items.len() - checked,
        checked,
        items,
    })
}

/// Group the list by supermarket walking route
pub fn get_store_route(db: &Database, include_checked: bool) -> Result<StoreRouteResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let mut items = GroceryItem::list(&conn).map_err(|e| format!("Failed to list items: {}", e))?;
    if !include_checked {
        items.retain(|i| !i.checked);
    }

    let total_items = items.len();
    let groups = sort_by_store_route(items);

    Ok(StoreRouteResponse { groups, total_items })
}

/// Toggle the checked state of an item
pub fn toggle_grocery_item(db: &Database, id: i64) -> Result<Option<GroceryItem>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    GroceryItem::toggle(&conn, id).map_err(|e| format!("Failed to toggle item: {}", e))
}

/// Remove an item from the list
pub fn remove_grocery_item(db: &Database, id: i64) -> Result<bool, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    GroceryItem::delete(&conn, id).map_err(|e| format!("Failed to remove item: {}", e))
}

/// Remove every checked item
pub fn clear_checked_items(db: &Database) -> Result<ClearResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let removed = GroceryItem::clear_checked(&conn)
        .map_err(|e| format!("Failed to clear checked items: {}", e))?;

    Ok(ClearResponse { removed })
}

/// Remove every item on the list
pub fn clear_all_items(db: &Database) -> Result<ClearResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let removed =
        GroceryItem::clear_all(&conn).map_err(|e| format!("Failed to clear list: {}", e))?;

    Ok(ClearResponse { removed })
}

// ============================================================================
// Merge and Recipe Tools
// ============================================================================

/// Merge duplicate unchecked items, applying all deletes and renames in one
/// transaction
pub fn merge_duplicate_items(
    db: &Database,
    sep: DecimalSeparator,
) -> Result<MergeResponse, String> {
    db.with_conn_mut(|conn| {
        let items = GroceryItem::list(conn)?;
        let candidates: Vec<MergeCandidate> = items
            .iter()
            .map(|item| MergeCandidate {
                id: item.id,
                name: item.name.clone(),
                checked: item.checked,
            })
            .collect();

        let plan = merge_duplicates(&candidates, sep);

        if !plan.is_empty() {
            let tx = conn.transaction()?;
            for id in &plan.to_delete {
                GroceryItem::delete(&tx, *id)?;
            }
            for rename in &plan.to_rename {
                GroceryItem::rename(&tx, rename.id, &rename.new_name)?;
            }
            tx.commit()?;

            tracing::info!(
                "Merged duplicates: {} removed, {} renamed",
                plan.to_delete.len(),
                plan.to_rename.len()
            );
        }

        Ok(MergeResponse {
            duplicates_removed: plan.to_delete.len(),
            items_renamed: plan.to_rename.len(),
            remaining_items: items.len() - plan.to_delete.len(),
            renamed: plan.to_rename,
        })
    })
    .map_err(|e| format!("Failed to merge duplicates: {}", e))
}

/// Put a recipe's ingredients on the grocery list, scaled to the requested
/// servings
pub fn add_recipe_to_grocery_list(
    db: &Database,
    recipe_id: i64,
    servings: Option<f64>,
    sep: DecimalSeparator,
) -> Result<Option<AddRecipeToListResponse>, String> {
    if let Some(s) = servings {
        if s <= 0.0 {
            return Err("servings must be greater than 0".to_string());
        }
    }

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let recipe = Recipe::get_by_id(&conn, recipe_id)
        .map_err(|e| format!("Failed to get recipe: {}", e))?;

    match recipe {
        Some(recipe) => {
            let multiplier = match servings {
                Some(s) if recipe.servings > 0.0 => s / recipe.servings,
                _ => 1.0,
            };

            let mut added = Vec::new();
            let mut skipped = Vec::new();

            for ingredient in &recipe.ingredients {
                let scaled = scale_ingredient(ingredient, multiplier, sep);

                let exists = GroceryItem::exists_unchecked(&conn, &scaled)
                    .map_err(|e| format!("Failed to check list: {}", e))?;
                if exists {
                    skipped.push(scaled);
                    continue;
                }

                GroceryItem::create(
                    &conn,
                    &GroceryItemCreate {
                        name: scaled.clone(),
                        from_recipe: Some(recipe.name.clone()),
                    },
                )
                .map_err(|e| format!("Failed to add item: {}", e))?;
                added.push(scaled);
            }

            Ok(Some(AddRecipeToListResponse {
                recipe: recipe.name,
                multiplier,
                added,
                skipped,
            }))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations;
    use crate::models::RecipeCreate;

    // Each test gets its own shared-cache in-memory database. The pool keeps
    // connections open, so the database lives until the Database is dropped.
    fn test_db(name: &str) -> Database {
        let uri = format!("file:{}?mode=memory&cache=shared", name);
        let db = Database::new(uri).unwrap();
        db.with_conn(|conn| migrations::run_migrations(conn)).unwrap();
        db
    }

    #[test]
    fn test_add_and_list_items() {
        let db = test_db("ugm_test_groceries_list");

        let added = add_grocery_item(&db, "2 bananen", None).unwrap();
        assert_eq!(added.name, "2 bananen");
        assert_eq!(added.category, RouteCategory::GroenteFruit);

        add_grocery_item(&db, "toiletpapier", None).unwrap();

        let list = list_grocery_items(&db).unwrap();
        assert_eq!(list.total, 2);
        assert_eq!(list.unchecked, 2);
        assert_eq!(list.checked, 0);
        assert_eq!(list.items[0].name, "2 bananen");
    }

    #[test]
    fn test_add_rejects_empty_name() {
        let db = test_db("ugm_test_groceries_empty");
        assert!(add_grocery_item(&db, "   ", None).is_err());
    }

    #[test]
    fn test_toggle_and_clear_checked() {
        let db = test_db("ugm_test_groceries_toggle");

        let a = add_grocery_item(&db, "melk", None).unwrap();
        add_grocery_item(&db, "brood", None).unwrap();

        let toggled = toggle_grocery_item(&db, a.id).unwrap().unwrap();
        assert!(toggled.checked);

        let cleared = clear_checked_items(&db).unwrap();
        assert_eq!(cleared.removed, 1);

        let list = list_grocery_items(&db).unwrap();
        assert_eq!(list.total, 1);
        assert_eq!(list.items[0].name, "brood");

        assert!(toggle_grocery_item(&db, 9999).unwrap().is_none());
    }

    #[test]
    fn test_merge_applies_plan_in_one_pass() {
        let db = test_db("ugm_test_groceries_merge");

        add_grocery_item(&db, "2 bananen", None).unwrap();
        add_grocery_item(&db, "3 bananen", None).unwrap();
        add_grocery_item(&db, "melk", None).unwrap();

        let merged = merge_duplicate_items(&db, DecimalSeparator::Comma).unwrap();
        assert_eq!(merged.duplicates_removed, 1);
        assert_eq!(merged.items_renamed, 1);
        assert_eq!(merged.renamed[0].new_name, "5 bananen");
        assert_eq!(merged.remaining_items, 2);

        let list = list_grocery_items(&db).unwrap();
        assert_eq!(list.total, 2);
        assert_eq!(list.items[0].name, "5 bananen");
        assert_eq!(list.items[1].name, "melk");
    }

    #[test]
    fn test_add_recipe_to_list_scales_and_skips() {
        let db = test_db("ugm_test_groceries_recipe");

        let recipe = crate::tools::recipes::add_recipe(
            &db,
            RecipeCreate {
                name: "Pasta".to_string(),
                description: String::new(),
                ingredients: vec!["400g spaghetti".to_string(), "4 eieren".to_string()],
                instructions: None,
                image_url: None,
                source_url: None,
                servings: 4.0,
            },
        )
        .unwrap();

        let result = add_recipe_to_grocery_list(&db, recipe.id, Some(8.0), DecimalSeparator::Comma)
            .unwrap()
            .unwrap();
        assert_eq!(result.multiplier, 2.0);
        assert_eq!(result.added, vec!["800g spaghetti", "8 eieren"]);
        assert!(result.skipped.is_empty());

        // Same call again: everything is already on the list unchecked
        let again = add_recipe_to_grocery_list(&db, recipe.id, Some(8.0), DecimalSeparator::Comma)
            .unwrap()
            .unwrap();
        assert!(again.added.is_empty());
        assert_eq!(again.skipped.len(), 2);

        let list = list_grocery_items(&db).unwrap();
        assert_eq!(list.total, 2);
        assert_eq!(list.items[0].from_recipe.as_deref(), Some("Pasta"));
    }

    #[test]
    fn test_add_recipe_to_list_unknown_recipe() {
        let db = test_db("ugm_test_groceries_norecipe");
        let result =
            add_recipe_to_grocery_list(&db, 42, None, DecimalSeparator::Comma).unwrap();
        assert!(result.is_none());
    }
}
