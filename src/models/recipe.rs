//! Recipe model
//!
//! Recipes keep their ingredients as free-text lines (a JSON array column)
//! so the list stays exactly as the cook wrote it. The optional macro
//! estimate covers the whole recipe and is either fully present or fully
//! absent.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;
use super::Macros;

/// A stored recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Option<String>,
    pub image_url: Option<String>,
    pub source_url: Option<String>,
    pub servings: f64,
    pub macros: Option<Macros>,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for creating a new recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeCreate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    pub instructions: Option<String>,
    pub image_url: Option<String>,
    pub source_url: Option<String>,
    #[serde(default = "default_servings")]
    pub servings: f64,
}

fn default_servings() -> f64 {
    4.0
}

/// Data for updating a recipe
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<String>,
    pub image_url: Option<String>,
    pub source_url: Option<String>,
    pub servings: Option<f64>,
}

impl Recipe {
    /// Create a Recipe from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let raw: String = row.get("ingredients")?;
        let ingredients: Vec<String> = serde_json::from_str(&raw).unwrap_or_default();

        // Macros only exist as a complete set of five
        let macros = match (
            row.get::<_, Option<i64>>("macros_calories")?,
            row.get::<_, Option<i64>>("macros_protein")?,
            row.get::<_, Option<i64>>("macros_carbs")?,
            row.get::<_, Option<i64>>("macros_fat")?,
            row.get::<_, Option<i64>>("macros_fiber")?,
        ) {
            (Some(calories), Some(protein), Some(carbs), Some(fat), Some(fiber)) => {
                Some(Macros { calories, protein, carbs, fat, fiber })
            }
            _ => None,
        };

        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            ingredients,
            instructions: row.get("instructions")?,
            image_url: row.get("image_url")?,
            source_url: row.get("source_url")?,
            servings: row.get("servings")?,
            macros,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Insert a new recipe into the database
    pub fn create(conn: &Connection, data: &RecipeCreate) -> DbResult<Self> {
        let ingredients_json = serde_json::to_string(&data.ingredients)?;

        conn.execute(
            r#"
            INSERT INTO recipes (
                name, description, ingredients, instructions, image_url, source_url, servings
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                data.name,
                data.description,
                ingredients_json,
                data.instructions,
                data.image_url,
                data.source_url,
                data.servings,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    /// Get a recipe by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM recipes WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(recipe) => Ok(Some(recipe)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List recipes, newest first, optionally filtered by a search string
    pub fn list(conn: &Connection, query: Option<&str>) -> DbResult<Vec<Self>> {
        let recipes = if let Some(q) = query {
            let pattern = format!("%{}%", q);
            let mut stmt = conn.prepare(
                r#"
                SELECT * FROM recipes
                WHERE name LIKE ?1 OR description LIKE ?1
                ORDER BY created_at DESC, id DESC
                "#
            )?;
            let rows = stmt.query_map([&pattern], Self::from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            rows
        } else {
            let mut stmt = conn.prepare(
                "SELECT * FROM recipes ORDER BY created_at DESC, id DESC"
            )?;
            let rows = stmt.query_map([], Self::from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            rows
        };

        Ok(recipes)
    }

    /// Update a recipe
    pub fn update(conn: &Connection, id: i64, data: &RecipeUpdate) -> DbResult<Option<Self>> {
        let mut updates = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(ref name) = data.name {
            updates.push(format!("name = ?{}", params_vec.len() + 1));
            params_vec.push(Box::new(name.clone()));
        }
        if let Some(ref description) = data.description {
            updates.push(format!("description = ?{}", params_vec.len() + 1));
            params_vec.push(Box::new(description.clone()));
        }
        if let Some(ref ingredients) = data.ingredients {
            let json = serde_json::to_string(ingredients)?;
            updates.push(format!("ingredients = ?{}", params_vec.len() + 1));
            params_vec.push(Box::new(json));
        }
        if let Some(ref instructions) = data.instructions {
            updates.push(format!("instructions = ?{}", params_vec.len() + 1));
            params_vec.push(Box::new(instructions.clone()));
        }
        if let Some(ref image_url) = data.image_url {
            updates.push(format!("image_url = ?{}", params_vec.len() + 1));
            params_vec.push(Box::new(image_url.clone()));
        }
        if let Some(ref source_url) = data.source_url {
            updates.push(format!("source_url = ?{}", params_vec.len() + 1));
            params_vec.push(Box::new(source_url.clone()));
        }
        if let Some(servings) = data.servings {
            updates.push(format!("servings = ?{}", params_vec.len() + 1));
            params_vec.push(Box::new(servings));
        }

        if updates.is_empty() {
            return Self::get_by_id(conn, id);
        }

        updates.push("updated_at = datetime('now')".to_string());

        let sql = format!(
            "UPDATE recipes SET {} WHERE id = ?{}",
            updates.join(", "),
            params_vec.len() + 1
        );

        params_vec.push(Box::new(id));

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
        conn.execute(&sql, params_refs.as_slice())?;

        Self::get_by_id(conn, id)
    }

    /// Store a macro estimate for the whole recipe (overwrites any previous one)
    pub fn set_macros(conn: &Connection, id: i64, macros: &Macros) -> DbResult<Option<Self>> {
        let rows = conn.execute(
            r#"
            UPDATE recipes SET
                macros_calories = ?1,
                macros_protein = ?2,
                macros_carbs = ?3,
                macros_fat = ?4,
                macros_fiber = ?5,
                updated_at = datetime('now')
            WHERE id = ?6
            "#,
            params![
                macros.calories,
                macros.protein,
                macros.carbs,
                macros.fat,
                macros.fiber,
                id,
            ],
        )?;
        if rows == 0 {
            return Ok(None);
        }
        Self::get_by_id(conn, id)
    }

    /// Remove the macro estimate from a recipe
    pub fn clear_macros(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let rows = conn.execute(
            r#"
            UPDATE recipes SET
                macros_calories = NULL,
                macros_protein = NULL,
                macros_carbs = NULL,
                macros_fat = NULL,
                macros_fiber = NULL,
                updated_at = datetime('now')
            WHERE id = ?1
            "#,
            [id],
        )?;
        if rows == 0 {
            return Ok(None);
        }
        Self::get_by_id(conn, id)
    }

    /// Delete a recipe
    /// Returns Ok(true) if deleted, Ok(false) if not found
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM recipes WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }

    /// Count recipes
    pub fn count(conn: &Connection) -> DbResult<i64> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM recipes", [], |row| row.get(0))?;
        Ok(count)
    }
}
