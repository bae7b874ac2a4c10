//! UGM Status Tool
//!
//! Provides runtime status information about the UGM service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Grocery list instructions for AI assistants
pub const GROCERY_INSTRUCTIONS: &str = r#"
# UGM Grocery List Instructions

This guide explains how to manage the shared grocery list using the Universal Grocery Manager (UGM) tools.

## Overview

UGM keeps one household grocery list plus a recipe box. The main pieces:

1. **Grocery items** - Free-text lines like "2 bananen" or "500g kip"
2. **Store route** - The list grouped by supermarket section, in walking order
3. **Recipes** - Ingredient lists that can be scaled and pushed onto the grocery list
4. **Usuals** - Staples the household buys every week, re-added with one call
5. **Share links** - Read-only codes for showing the list to someone else

## Item Names

Item names are plain text. A leading number counts as a quantity:

- "2 bananen" → quantity 2, product "bananen"
- "1,5 kg bloem" → quantity 1.5, product "kg bloem" (comma works as decimal point)
- "bananen" → no quantity

Keep the quantity at the front so duplicate merging can sum it later. Do not
invent units the user didn't say.

## The Store Route

`get_store_route` returns the unchecked list grouped by supermarket section, in
the order you walk the store:

| Order | Section | Label |
|-------|---------|-------|
| 1 | groente_fruit | 🥬 Groente & Fruit |
| 2 | brood | 🍞 Brood |
| 3 | vers | 🥩 Vers |
| 4 | houdbaar | 🥫 Houdbaar |
| 5 | non_food | 🧴 Non-food |
| 6 | diepvries | 🧊 Diepvries |

Sections with no items are left out. Items the keyword tables don't recognize
go to Houdbaar (the middle of the store). Categorization is automatic; there is
no way (and no need) to set a category by hand.

When the user is about to go shopping, show them the store route rather than
the flat list.

## Merging Duplicates

`merge_duplicate_items` collapses repeated entries on the unchecked list:

- "2 bananen" + "3 bananen" → one line "5 bananen"
- "bananen" + "bananen" → one line "bananen" (no quantities, nothing to sum)
- "2 bananen" + "bananen" → one line "2 bananen" (mixed, name kept as-is)

Checked items are never touched. Run this after adding a recipe to the list or
when the user says the list looks messy.

## Recipes

### Adding a recipe

```
add_recipe(
  name: "Pasta Carbonara",
  description: "Classic Italian pasta with eggs, cheese, and pancetta",
  ingredients: ["Spaghetti (400g)", "Pancetta (200g)", "Eggs (4)", "Black pepper", "Salt"],
  servings: 4
)
```

Ingredients are free-text lines, one per ingredient, quantity first where there
is one. `servings` is how many people the quantities are for (default 4).

### Scaling

`get_recipe(id, servings: 6)` returns the ingredient list scaled from the
stored serving count to 6. `add_recipe_to_grocery_list(recipe_id, servings: 6)`
does the same and puts the scaled lines on the grocery list. Scaling rewrites
the numbers inside each line ("500g kip" doubled → "1000g kip", "½ cup flour"
doubled → "1 cup flour"); the stored recipe never changes. Numbers over 1000
are left alone unless the line has a gram/ml amount, so years and product
codes survive.

Ingredients already on the list (same name, unchecked) are skipped, not
duplicated.

## Macro Estimates

Recipes can carry a macro estimate. UGM does not compute it; you do.

When the user asks for macros on a recipe:

1. `get_recipe(id)` to see the ingredients and servings
2. Estimate **totals for the ENTIRE recipe** (all servings combined), as
   whole numbers: calories (kcal), protein, carbs, fat, fiber (grams)
3. `set_recipe_macros(id, calories, protein, carbs, fat, fiber)`

For per-serving numbers, divide by the serving count when presenting; store
only whole-recipe totals. Use `clear_recipe_macros(id)` when the ingredients
change enough that the old estimate is misleading.

## Usuals

Weekly staples live in the usuals list:

- `add_usual(name: "melk")` - remember a staple
- `list_usuals()` - alphabetical overview
- `add_usual_to_list(id)` - put it on the grocery list (skipped if already there)
- `remove_usual(id)` - forget it

When the user says "add the usual stuff", walk `list_usuals` and call
`add_usual_to_list` for each.

## Share Links

- `create_share_link()` - returns the active code, creating one if needed
  (calling it twice returns the same code)
- `get_shared_list(code)` - the read-only snapshot behind a code
- `revoke_share_link()` - kill the active code

Share codes are 10-character strings. There is at most one active code; revoke
before creating when the user wants a fresh one.

## Quick Reference

| Task | Tool |
|------|------|
| Add item to list | `add_grocery_item` |
| See the whole list | `list_grocery_items` |
| List grouped for shopping | `get_store_route` |
| Check/uncheck an item | `toggle_grocery_item` |
| Remove one item | `remove_grocery_item` |
| Remove all checked items | `clear_checked_items` |
| Empty the list | `clear_all_items` |
| Collapse duplicate lines | `merge_duplicate_items` |
| Recipe ingredients onto list | `add_recipe_to_grocery_list` |
| Create recipe | `add_recipe` |
| View recipe (optionally scaled) | `get_recipe` |
| Find recipes | `list_recipes` |
| Change recipe | `update_recipe` |
| Delete recipe | `remove_recipe` |
| Store macro estimate | `set_recipe_macros` |
| Drop macro estimate | `clear_recipe_macros` |
| Remember a staple | `add_usual` |
| List staples | `list_usuals` |
| Staple onto list | `add_usual_to_list` |
| Forget a staple | `remove_usual` |
| Get/create share code | `create_share_link` |
| View shared snapshot | `get_shared_list` |
| Revoke share code | `revoke_share_link` |

## Notes

- The list is shared: assume someone else may have checked items off since the
  last call, so re-fetch before summarizing
- Checked items stay on the list until `clear_checked_items`; that is the
  "done shopping" step
- Quantities format with a decimal comma by default ("2,5"); the server can be
  switched to periods via UGM_DECIMAL_SEPARATOR
- Item and recipe names keep whatever language the user typed; the keyword
  tables understand Dutch and English
"#;

/// Runtime status of the UGM service
#[derive(Debug, Clone, Serialize)]
pub struct UgmStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    /// Create a new status tracker
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> UgmStatus {
        let build_info = BuildInfo::current();

        // Get database size if it exists
        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        // Get process info
        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        UgmStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
