//! Usuals MCP tools
//!
//! Tools for the household's standard staples and putting them back on the
//! list with one call.

use serde::Serialize;

use crate::db::Database;
use crate::models::{GroceryItem, GroceryItemCreate, UsualItem};

/// Response for list_usuals
#[derive(Debug, Serialize)]
pub struct ListUsualsResponse {
    pub usuals: Vec<UsualItem>,
    pub count: usize,
}

/// Response for add_usual_to_list
#[derive(Debug, Serialize)]
pub struct AddUsualToListResponse {
    pub name: String,
    /// False when an unchecked item with this name was already on the list
    pub added: bool,
}

/// Add a staple to the usuals
pub fn add_usual(db: &Database, name: &str) -> Result<UsualItem, String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Usual name cannot be empty".to_string());
    }

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    UsualItem::create(&conn, name).map_err(|e| format!("Failed to add usual: {}", e))
}

/// List all usuals alphabetically
pub fn list_usuals(db: &Database) -> Result<ListUsualsResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let usuals = UsualItem::list(&conn).map_err(|e| format!("Failed to list usuals: {}", e))?;

    Ok(ListUsualsResponse {
        count: usuals.len(),
        usuals,
    })
}

/// Remove a staple from the usuals
pub fn remove_usual(db: &Database, id: i64) -> Result<bool, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    UsualItem::delete(&conn, id).map_err(|e| format!("Failed to remove usual: {}", e))
}

/// Put a usual on the grocery list, skipping when it is already there
pub fn add_usual_to_list(db: &Database, id: i64) -> Result<Option<AddUsualToListResponse>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let usual = UsualItem::get_by_id(&conn, id)
        .map_err(|e| format!("Failed to get usual: {}", e))?;

    match usual {
        Some(usual) => {
            let exists = GroceryItem::exists_unchecked(&conn, &usual.name)
                .map_err(|e| format!("Failed to check list: {}", e))?;

            if !exists {
                GroceryItem::create(
                    &conn,
                    &GroceryItemCreate {
                        name: usual.name.clone(),
                        from_recipe: None,
                    },
                )
                .map_err(|e| format!("Failed to add item: {}", e))?;
            }

            Ok(Some(AddUsualToListResponse {
                name: usual.name,
                added: !exists,
            }))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations;
    use crate::tools::groceries;

    fn test_db(name: &str) -> Database {
        let uri = format!("file:{}?mode=memory&cache=shared", name);
        let db = Database::new(uri).unwrap();
        db.with_conn(|conn| migrations::run_migrations(conn)).unwrap();
        db
    }

    #[test]
    fn test_usuals_are_listed_alphabetically() {
        let db = test_db("ugm_test_usuals_order");

        add_usual(&db, "melk").unwrap();
        add_usual(&db, "Boter").unwrap();
        add_usual(&db, "kaas").unwrap();

        let list = list_usuals(&db).unwrap();
        assert_eq!(list.count, 3);
        let names: Vec<&str> = list.usuals.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Boter", "kaas", "melk"]);
    }

    #[test]
    fn test_add_usual_to_list_skips_existing() {
        let db = test_db("ugm_test_usuals_skip");

        let usual = add_usual(&db, "melk").unwrap();

        let first = add_usual_to_list(&db, usual.id).unwrap().unwrap();
        assert!(first.added);

        let second = add_usual_to_list(&db, usual.id).unwrap().unwrap();
        assert!(!second.added);

        let list = groceries::list_grocery_items(&db).unwrap();
        assert_eq!(list.total, 1);

        // Once the item is checked off, the usual goes back on
        groceries::toggle_grocery_item(&db, list.items[0].id).unwrap();
        let third = add_usual_to_list(&db, usual.id).unwrap().unwrap();
        assert!(third.added);

        assert!(add_usual_to_list(&db, 9999).unwrap().is_none());
    }

    #[test]
    fn test_remove_usual() {
        let db = test_db("ugm_test_usuals_remove");

        let usual = add_usual(&db, "boter").unwrap();
        assert!(remove_usual(&db, usual.id).unwrap());
        assert!(!remove_usual(&db, usual.id).unwrap());
        assert_eq!(list_usuals(&db).unwrap().count, 0);
    }
}
