//! Utility to seed starter recipes into an empty database

use std::path::PathBuf;

use ugm::models::{Recipe, RecipeCreate};

fn get_database_path() -> PathBuf {
    std::env::var("UGM_DATABASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut path = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."));

            // Go up from target/release or target/debug to project root
            if path.ends_with("release") || path.ends_with("debug") {
                if let Some(parent) = path.parent() {
                    if let Some(grandparent) = parent.parent() {
                        path = grandparent.to_path_buf();
                    }
                }
            }

            path.push("data");
            std::fs::create_dir_all(&path).ok();
            path.push("ugm.db");
            path
        })
}

fn starter_recipes() -> Vec<RecipeCreate> {
    vec![
        RecipeCreate {
            name: "Pasta Carbonara".to_string(),
            description: "Classic Italian pasta with eggs, cheese, and pancetta".to_string(),
            ingredients: vec![
                "400g spaghetti".to_string(),
                "200g pancetta".to_string(),
                "4 eggs".to_string(),
                "100g parmesan cheese".to_string(),
                "Black pepper".to_string(),
                "Salt".to_string(),
            ],
            instructions: None,
            image_url: None,
            source_url: None,
            servings: 4.0,
        },
        RecipeCreate {
            name: "Greek Salad".to_string(),
            description: "Fresh Mediterranean salad with feta and olives".to_string(),
            ingredients: vec![
                "1 cucumber".to_string(),
                "4 tomatoes".to_string(),
                "1 red onion".to_string(),
                "200g feta cheese".to_string(),
                "Kalamata olives".to_string(),
                "Olive oil".to_string(),
                "Oregano".to_string(),
            ],
            instructions: None,
            image_url: None,
            source_url: None,
            servings: 4.0,
        },
        RecipeCreate {
            name: "Chicken Stir-Fry".to_string(),
            description: "Quick and easy Asian-inspired stir-fry".to_string(),
            ingredients: vec![
                "500g chicken breast".to_string(),
                "2 bell peppers".to_string(),
                "1 broccoli head".to_string(),
                "Soy sauce".to_string(),
                "3 garlic cloves".to_string(),
                "Ginger".to_string(),
                "300g rice".to_string(),
                "Sesame oil".to_string(),
            ],
            instructions: None,
            image_url: None,
            source_url: None,
            servings: 4.0,
        },
    ]
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let db_path = get_database_path();
    println!("Database path: {}", db_path.display());

    let database = ugm::db::Database::new(&db_path)?;

    // Run migrations
    database.with_conn(|conn| {
        ugm::db::migrations::run_migrations(conn)?;
        Ok(())
    })?;

    // Seed only when no recipes exist yet
    database.with_conn(|conn| {
        let existing = Recipe::count(conn)?;
        if existing > 0 {
            println!("Database already has {} recipe(s), nothing to seed", existing);
            return Ok(());
        }

        for data in starter_recipes() {
            let recipe = Recipe::create(conn, &data)?;
            println!(
                "Seeded recipe {}: {} ({} ingredients, {} servings)",
                recipe.id,
                recipe.name,
                recipe.ingredients.len(),
                recipe.servings
            );
        }
        Ok(())
    })?;

    Ok(())
}
