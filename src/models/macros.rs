//! Recipe macro estimate
//!
//! Whole-number nutrition totals for an entire recipe.

use serde::{Deserialize, Serialize};

/// Estimated macros for a whole recipe (all servings combined)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Macros {
    pub calories: i64, // kcal
    pub protein: i64,  // grams
    pub carbs: i64,    // grams
    pub fat: i64,      // grams
    pub fiber: i64,    // grams
}
