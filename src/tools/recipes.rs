//! Recipe MCP tools
//!
//! Tools for managing recipes and their macro estimates. Ingredients are
//! free-text lines; scaling to a different serving count happens at read
//! time and never touches the stored recipe.

use serde::Serialize;

use crate::db::Database;
use crate::models::{Macros, Recipe, RecipeCreate, RecipeUpdate};
use crate::quantity::{scale_ingredient, DecimalSeparator};

/// Response for add_recipe
#[derive(Debug, Serialize)]
pub struct CreateRecipeResponse {
    pub id: i64,
    pub name: String,
    pub ingredient_count: usize,
    pub servings: f64,
    pub created_at: String,
}

/// Full recipe detail, with ingredients scaled to the requested servings
#[derive(Debug, Serialize)]
pub struct RecipeDetail {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Option<String>,
    pub image_url: Option<String>,
    pub source_url: Option<String>,
    /// Servings the ingredient list above is scaled for
    pub servings: f64,
    /// Servings the recipe is stored for
    pub base_servings: f64,
    pub multiplier: f64,
    /// Macro estimate for the whole recipe at its base servings
    pub macros: Option<Macros>,
    pub created_at: String,
    pub updated_at: String,
}

/// Recipe summary for listing
#[derive(Debug, Serialize)]
pub struct RecipeSummary {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub servings: f64,
    pub ingredient_count: usize,
    pub has_macros: bool,
    pub created_at: String,
}

/// Response for list_recipes
#[derive(Debug, Serialize)]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeSummary>,
    pub count: usize,
}

/// Response for set_recipe_macros / clear_recipe_macros
#[derive(Debug, Serialize)]
pub struct RecipeMacrosResponse {
    pub id: i64,
    pub name: String,
    pub macros: Option<Macros>,
}

// ============================================================================
// Recipe Tools
// ============================================================================

/// Trim ingredient lines and drop the empty ones
fn clean_ingredients(ingredients: Vec<String>) -> Vec<String> {
    ingredients
        .into_iter()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

/// Create a new recipe
pub fn add_recipe(db: &Database, data: RecipeCreate) -> Result<CreateRecipeResponse, String> {
    let name = data.name.trim();
    if name.is_empty() {
        return Err("Recipe name cannot be empty".to_string());
    }
    if data.servings <= 0.0 {
        return Err("servings must be greater than 0".to_string());
    }

    let data = RecipeCreate {
        name: name.to_string(),
        ingredients: clean_ingredients(data.ingredients),
        ..data
    };

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let recipe = Recipe::create(&conn, &data)
        .map_err(|e| format!("Failed to create recipe: {}", e))?;

    Ok(CreateRecipeResponse {
        id: recipe.id,
        name: recipe.name,
        ingredient_count: recipe.ingredients.len(),
        servings: recipe.servings,
        created_at: recipe.created_at,
    })
}

/// Get a recipe, optionally scaled to a different serving count
pub fn get_recipe(
    db: &Database,
    id: i64,
    servings: Option<f64>,
    sep: DecimalSeparator,
) -> Result<Option<RecipeDetail>, String> {
    if let Some(s) = servings {
        if s <= 0.0 {
            return Err("servings must be greater than 0".to_string());
        }
    }

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let recipe = Recipe::get_by_id(&conn, id)
        .map_err(|e| format!("Failed to get recipe: {}", e))?;

    match recipe {
        Some(recipe) => {
            let multiplier = match servings {
                Some(s) if recipe.servings > 0.0 => s / recipe.servings,
                _ => 1.0,
            };

            let ingredients = recipe
                .ingredients
                .iter()
                .map(|line| scale_ingredient(line, multiplier, sep))
                .collect();

            Ok(Some(RecipeDetail {
                id: recipe.id,
                name: recipe.name,
                description: recipe.description,
                ingredients,
                instructions: recipe.instructions,
                image_url: recipe.image_url,
                source_url: recipe.source_url,
                servings: servings.unwrap_or(recipe.servings),
                base_servings: recipe.servings,
                multiplier,
                macros: recipe.macros,
                created_at: recipe.created_at,
                updated_at: recipe.updated_at,
            }))
        }
        None => Ok(None),
    }
}

/// List recipes, optionally filtered by a search string
pub fn list_recipes(db: &Database, query: Option<&str>) -> Result<ListRecipesResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let recipes = Recipe::list(&conn, query)
        .map_err(|e| format!("Failed to list recipes: {}", e))?;

    let summaries: Vec<RecipeSummary> = recipes
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

    Ok(ListRecipesResponse {
        count: summaries.len(),
        recipes: summaries,
    })
}

/// Update a recipe
pub fn update_recipe(
    db: &Database,
    id: i64,
    data: RecipeUpdate,
) -> Result<Option<Recipe>, String> {
    if let Some(ref name) = data.name {
        if name.trim().is_empty() {
            return Err("Recipe name cannot be empty".to_string());
        }
    }
    if let Some(s) = data.servings {
        if s <= 0.0 {
            return Err("servings must be greater than 0".to_string());
        }
    }

    let data = RecipeUpdate {
        name: data.name.map(|n| n.trim().to_string()),
        ingredients: data.ingredients.map(clean_ingredients),
        ..data
    };

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    Recipe::update(&conn, id, &data).map_err(|e| format!("Failed to update recipe: {}", e))
}

/// Delete a recipe
pub fn remove_recipe(db: &Database, id: i64) -> Result<bool, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    Recipe::delete(&conn, id).map_err(|e| format!("Failed to delete recipe: {}", e))
}

// ============================================================================
// Macro Tools
// ============================================================================

/// Store a caller-provided macro estimate for the whole recipe
pub fn set_recipe_macros(
    db: &Database,
    id: i64,
    macros: Macros,
) -> Result<Option<RecipeMacrosResponse>, String> {
    if macros.calories < 0
        || macros.protein < 0
        || macros.carbs < 0
        || macros.fat < 0
        || macros.fiber < 0
    {
        return Err("Macro values cannot be negative".to_string());
    }

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let updated = Recipe::set_macros(&conn, id, &macros)
        .map_err(|e| format!("Failed to set macros: {}", e))?;

    Ok(updated.map(|recipe| RecipeMacrosResponse {
        id: recipe.id,
        name: recipe.name,
        macros: recipe.macros,
    }))
}

/// Remove the macro estimate from a recipe
pub fn clear_recipe_macros(db: &Database, id: i64) -> Result<Option<RecipeMacrosResponse>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let updated = Recipe::clear_macros(&conn, id)
        .map_err(|e| format!("Failed to clear macros: {}", e))?;

    Ok(updated.map(|recipe| RecipeMacrosResponse {
        id: recipe.id,
        name: recipe.name,
        macros: recipe.macros,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations;

    fn test_db(name: &str) -> Database {
        let uri = format!("file:{}?mode=memory&cache=shared", name);
        let db = Database::new(uri).unwrap();
        db.with_conn(|conn| migrations::run_migrations(conn)).unwrap();
        db
    }

    fn sample_recipe(name: &str) -> RecipeCreate {
        RecipeCreate {
            name: name.to_string(),
            description: "Weeknight dinner".to_string(),
            ingredients: vec![
                "200g rijst".to_string(),
                "  2 paprika's  ".to_string(),
                "   ".to_string(),
            ],
            instructions: None,
            image_url: None,
            source_url: None,
            servings: 4.0,
        }
    }

    #[test]
    fn test_add_recipe_cleans_ingredients() {
        let db = test_db("ugm_test_recipes_add");

        let created = add_recipe(&db, sample_recipe("Rijstschotel")).unwrap();
        assert_eq!(created.ingredient_count, 2);

        let detail = get_recipe(&db, created.id, None, DecimalSeparator::Comma)
            .unwrap()
            .unwrap();
        assert_eq!(detail.ingredients, vec!["200g rijst", "2 paprika's"]);
        assert_eq!(detail.multiplier, 1.0);
        assert_eq!(detail.servings, 4.0);
    }

    #[test]
    fn test_add_recipe_validation() {
        let db = test_db("ugm_test_recipes_validation");

        let mut empty_name = sample_recipe("  ");
        empty_name.ingredients.clear();
        assert!(add_recipe(&db, empty_name).is_err());

        let mut bad_servings = sample_recipe("Soep");
        bad_servings.servings = 0.0;
        assert!(add_recipe(&db, bad_servings).is_err());
    }

    #[test]
    fn test_get_recipe_scales_for_display_only() {
        let db = test_db("ugm_test_recipes_scale");

        let created = add_recipe(&db, sample_recipe("Rijstschotel")).unwrap();

        let halved = get_recipe(&db, created.id, Some(2.0), DecimalSeparator::Comma)
            .unwrap()
            .unwrap();
        assert_eq!(halved.multiplier, 0.5);
        assert_eq!(halved.servings, 2.0);
        assert_eq!(halved.base_servings, 4.0);
        assert_eq!(halved.ingredients, vec!["100g rijst", "1 paprika's"]);

        // The stored recipe is untouched
        let stored = get_recipe(&db, created.id, None, DecimalSeparator::Comma)
            .unwrap()
            .unwrap();
        assert_eq!(stored.ingredients, vec!["200g rijst", "2 paprika's"]);
    }

    #[test]
    fn test_list_recipes_search() {
        let db = test_db("ugm_test_recipes_search");

        add_recipe(&db, sample_recipe("Rijstschotel")).unwrap();
        add_recipe(&db, sample_recipe("Pasta Carbonara")).unwrap();

        let all = list_recipes(&db, None).unwrap();
        assert_eq!(all.count, 2);

        let hits = list_recipes(&db, Some("pasta")).unwrap();
        assert_eq!(hits.count, 1);
        assert_eq!(hits.recipes[0].name, "Pasta Carbonara");

        // Description matches too
        let by_description = list_recipes(&db, Some("weeknight")).unwrap();
        assert_eq!(by_description.count, 2);
    }

    #[test]
    fn test_set_and_clear_macros() {
        let db = test_db("ugm_test_recipes_macros");

        let created = add_recipe(&db, sample_recipe("Rijstschotel")).unwrap();

        let macros = Macros {
            calories: 1800,
            protein: 60,
            carbs: 220,
            fat: 55,
            fiber: 18,
        };
        let set = set_recipe_macros(&db, created.id, macros).unwrap().unwrap();
        assert_eq!(set.macros, Some(macros));

        let negative = Macros { calories: -1, ..macros };
        assert!(set_recipe_macros(&db, created.id, negative).is_err());

        let cleared = clear_recipe_macros(&db, created.id).unwrap().unwrap();
        assert!(cleared.macros.is_none());

        assert!(set_recipe_macros(&db, 9999, macros).unwrap().is_none());
    }

    #[test]
    fn test_update_recipe_replaces_ingredients() {
        let db = test_db("ugm_test_recipes_update");

        let created = add_recipe(&db, sample_recipe("Rijstschotel")).unwrap();

        let updated = update_recipe(
            &db,
            created.id,
            RecipeUpdate {
                name: Some("Rijstschotel deluxe".to_string()),
                ingredients: Some(vec!["300g rijst".to_string()]),
                servings: Some(6.0),
                ..Default::default()
            },
        )
        .unwrap()
        .unwrap();
        assert_eq!(updated.name, "Rijstschotel deluxe");
        assert_eq!(updated.ingredients, vec!["300g rijst"]);
        assert_eq!(updated.servings, 6.0);

        assert!(remove_recipe(&db, created.id).unwrap());
        assert!(!remove_recipe(&db, created.id).unwrap());
    }
}
