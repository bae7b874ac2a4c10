//! UGM MCP Server Implementation
//!
//! Implements the MCP server with all UGM tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::db::Database;
use crate::models::{Macros, RecipeCreate, RecipeUpdate};
use crate::quantity::DecimalSeparator;
use crate::tools::groceries;
use crate::tools::recipes;
use crate::tools::share;
use crate::tools::status::StatusTracker;
use crate::tools::usuals;

/// UGM MCP Service
#[derive(Clone)]
pub struct UgmService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    /// Decimal separator used when formatting merged and scaled quantities
    decimal_separator: DecimalSeparator,
    tool_router: ToolRouter<UgmService>,
}

impl UgmService {
    pub fn new(
        database_path: PathBuf,
        database: Database,
        decimal_separator: DecimalSeparator,
    ) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path))),
            database,
            decimal_separator,
            tool_router: Self::tool_router(),
        }
    }
}

// ============================================================================
// Grocery Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddGroceryItemParams {
    /// Item name, with any quantity as a leading count (e.g. "2 bananen", "500g kipfilet")
    pub name: String,
    /// Name of the recipe this item came from (optional)
    pub from_recipe: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetStoreRouteParams {
    /// Include checked-off items in the route (default false)
    #[serde(default)]
    pub include_checked: bool,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ToggleGroceryItemParams {
    /// Grocery item ID to check or uncheck
    pub id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RemoveGroceryItemParams {
    /// Grocery item ID to remove
    pub id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddRecipeToListParams {
    /// Recipe ID whose ingredients should be added
    pub recipe_id: i64,
    /// Servings to cook; ingredient quantities are scaled from the recipe's base servings (optional)
    pub servings: Option<f64>,
}

// ============================================================================
// Recipe Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddRecipeParams {
    /// Name of the recipe
    pub name: String,
    /// Short description (optional)
    #[serde(default)]
    pub description: String,
    /// Ingredient lines, each with its quantity (e.g. "400g spaghetti", "4 eieren")
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Preparation instructions (optional)
    pub instructions: Option<String>,
    /// Image URL (optional)
    pub image_url: Option<String>,
    /// Source URL the recipe came from (optional)
    pub source_url: Option<String>,
    /// Number of servings the ingredient list makes (default 4)
    #[serde(default = "default_servings")]
    pub servings: f64,
}

fn default_servings() -> f64 { 4.0 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetRecipeParams {
    /// Recipe ID
    pub id: i64,
    /// Servings to display; ingredient quantities are scaled from the base servings (optional)
    pub servings: Option<f64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListRecipesParams {
    /// Search query matching recipe name or description (optional)
    pub query: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateRecipeParams {
    /// Recipe ID to update
    pub id: i64,
    /// New name (optional)
    pub name: Option<String>,
    /// New description (optional)
    pub description: Option<String>,
    /// New ingredient list, replacing the existing one entirely (optional)
    pub ingredients: Option<Vec<String>>,
    /// New instructions (optional)
    pub instructions: Option<String>,
    /// New image URL (optional)
    pub image_url: Option<String>,
    /// New source URL (optional)
    pub source_url: Option<String>,
    /// New base servings (optional)
    pub servings: Option<f64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RemoveRecipeParams {
    /// Recipe ID to remove
    pub id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetRecipeMacrosParams {
    /// Recipe ID
    pub id: i64,
    /// Total calories (kcal) for the whole recipe at its base servings
    pub calories: i64,
    /// Total protein in grams
    pub protein: i64,
    /// Total carbohydrates in grams
    pub carbs: i64,
    /// Total fat in grams
    pub fat: i64,
    /// Total fiber in grams
    pub fiber: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ClearRecipeMacrosParams {
    /// Recipe ID whose macro estimate should be removed
    pub id: i64,
}

// ============================================================================
// Usual Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddUsualParams {
    /// Item name to keep on the usuals list (e.g. "melk", "boter")
    pub name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RemoveUsualParams {
    /// Usual item ID to remove
    pub id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddUsualToListParams {
    /// Usual item ID to add to the grocery list
    pub id: i64,
}

// ============================================================================
// Share Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetSharedListParams {
    /// Share code from a share link
    pub code: String,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl UgmService {
    // --- Status ---

    #[tool(description = "Get the current status of the UGM service including build info, database status, and process information")]
    async fn ugm_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status();
        let json = serde_json::to_string_pretty(&status)
            .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get step-by-step instructions for managing the grocery list and recipes. Call this when starting a grocery session or when unsure how to use the grocery tools.")]
    fn grocery_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::GROCERY_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(GROCERY_INSTRUCTIONS)]))
    }

    // --- Grocery List ---

    #[tool(description = "Add an item to the grocery list. Put the quantity in the name itself (e.g. '2 bananen', '500g kipfilet'). Returns the store route category the item sorts into.")]
    fn add_grocery_item(&self, Parameters(p): Parameters<AddGroceryItemParams>) -> Result<CallToolResult, McpError> {
        let result = groceries::add_grocery_item(&self.database, &p.name, p.from_recipe)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "List all grocery items in the order they were added, with checked/unchecked counts")]
    fn list_grocery_items(&self) -> Result<CallToolResult, McpError> {
        let result = groceries::list_grocery_items(&self.database).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get the grocery list grouped by supermarket walking order: produce, bread, fresh, pantry, non-food, frozen. Empty sections are omitted.")]
    fn get_store_route(&self, Parameters(p): Parameters<GetStoreRouteParams>) -> Result<CallToolResult, McpError> {
        let result = groceries::get_store_route(&self.database, p.include_checked)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Toggle a grocery item between checked and unchecked")]
    fn toggle_grocery_item(&self, Parameters(p): Parameters<ToggleGroceryItemParams>) -> Result<CallToolResult, McpError> {
        let result = groceries::toggle_grocery_item(&self.database, p.id).map_err(|e| McpError::internal_error(e, None))?;
        let json = match result {
            Some(item) => serde_json::to_string_pretty(&item),
            None => Ok(format!(r#"{{"error": "Grocery item not found", "id": {}}}"#, p.id)),
        }.map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Remove a single item from the grocery list")]
    fn remove_grocery_item(&self, Parameters(p): Parameters<RemoveGroceryItemParams>) -> Result<CallToolResult, McpError> {
        let deleted = groceries::remove_grocery_item(&self.database, p.id).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::json!({"success": deleted, "id": p.id}).to_string();
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Remove all checked-off items from the grocery list")]
    fn clear_checked_items(&self) -> Result<CallToolResult, McpError> {
        let result = groceries::clear_checked_items(&self.database).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Remove every item from the grocery list, checked or not")]
    fn clear_all_items(&self) -> Result<CallToolResult, McpError> {
        let result = groceries::clear_all_items(&self.database).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Merge duplicate unchecked items by summing their leading quantities (e.g. '2 bananen' + '3 bananen' becomes '5 bananen'). Items whose quantities cannot all be read are deduplicated without renaming.")]
    fn merge_duplicate_items(&self) -> Result<CallToolResult, McpError> {
        let result = groceries::merge_duplicate_items(&self.database, self.decimal_separator)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Add all ingredients of a recipe to the grocery list, scaled to the requested servings. Ingredients already on the list (unchecked) are skipped.")]
    fn add_recipe_to_grocery_list(&self, Parameters(p): Parameters<AddRecipeToListParams>) -> Result<CallToolResult, McpError> {
        let result = groceries::add_recipe_to_grocery_list(&self.database, p.recipe_id, p.servings, self.decimal_separator)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = match result {
            Some(resp) => serde_json::to_string_pretty(&resp),
            None => Ok(format!(r#"{{"error": "Recipe not found", "id": {}}}"#, p.recipe_id)),
        }.map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Recipes ---

    #[tool(description = "Create a new recipe with its ingredient lines. Each ingredient carries its own quantity (e.g. '400g spaghetti').")]
    fn add_recipe(&self, Parameters(p): Parameters<AddRecipeParams>) -> Result<CallToolResult, McpError> {
        let data = RecipeCreate {
            name: p.name,
            description: p.description,
            ingredients: p.ingredients,
            instructions: p.instructions,
            image_url: p.image_url,
            source_url: p.source_url,
            servings: p.servings,
        };
        let result = recipes::add_recipe(&self.database, data).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get full recipe details. Pass servings to see ingredient quantities scaled for a different number of servings; the stored recipe is not modified.")]
    fn get_recipe(&self, Parameters(p): Parameters<GetRecipeParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::get_recipe(&self.database, p.id, p.servings, self.decimal_separator)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = match result {
            Some(recipe) => serde_json::to_string_pretty(&recipe),
            None => Ok(format!(r#"{{"error": "Recipe not found", "id": {}}}"#, p.id)),
        }.map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "List recipes, newest first, with optional search on name and description")]
    fn list_recipes(&self, Parameters(p): Parameters<ListRecipesParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::list_recipes(&self.database, p.query.as_deref())
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Update a recipe. Only the provided fields change; passing ingredients replaces the whole ingredient list.")]
    fn update_recipe(&self, Parameters(p): Parameters<UpdateRecipeParams>) -> Result<CallToolResult, McpError> {
        let data = RecipeUpdate {
            name: p.name,
            description: p.description,
            ingredients: p.ingredients,
            instructions: p.instructions,
            image_url: p.image_url,
            source_url: p.source_url,
            servings: p.servings,
        };
        let result = recipes::update_recipe(&self.database, p.id, data).map_err(|e| McpError::internal_error(e, None))?;
        let json = match result {
            Some(recipe) => serde_json::to_string_pretty(&recipe),
            None => Ok(format!(r#"{{"error": "Recipe not found", "id": {}}}"#, p.id)),
        }.map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Delete a recipe. Grocery items previously added from it stay on the list.")]
    fn remove_recipe(&self, Parameters(p): Parameters<RemoveRecipeParams>) -> Result<CallToolResult, McpError> {
        let deleted = recipes::remove_recipe(&self.database, p.id).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::json!({"success": deleted, "id": p.id}).to_string();
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Store a macro estimate (calories, protein, carbs, fat, fiber) for a recipe. Values are whole-number totals for the ENTIRE recipe at its base servings, not per serving.")]
    fn set_recipe_macros(&self, Parameters(p): Parameters<SetRecipeMacrosParams>) -> Result<CallToolResult, McpError> {
        let macros = Macros {
            calories: p.calories,
            protein: p.protein,
            carbs: p.carbs,
            fat: p.fat,
            fiber: p.fiber,
        };
        let result = recipes::set_recipe_macros(&self.database, p.id, macros)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = match result {
            Some(resp) => serde_json::to_string_pretty(&resp),
            None => Ok(format!(r#"{{"error": "Recipe not found", "id": {}}}"#, p.id)),
        }.map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Remove the stored macro estimate from a recipe")]
    fn clear_recipe_macros(&self, Parameters(p): Parameters<ClearRecipeMacrosParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::clear_recipe_macros(&self.database, p.id)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = match result {
            Some(resp) => serde_json::to_string_pretty(&resp),
            None => Ok(format!(r#"{{"error": "Recipe not found", "id": {}}}"#, p.id)),
        }.map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Usuals ---

    #[tool(description = "Add an item to the usuals list of frequently bought groceries")]
    fn add_usual(&self, Parameters(p): Parameters<AddUsualParams>) -> Result<CallToolResult, McpError> {
        let result = usuals::add_usual(&self.database, &p.name).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "List the usuals, alphabetically")]
    fn list_usuals(&self) -> Result<CallToolResult, McpError> {
        let result = usuals::list_usuals(&self.database).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Remove an item from the usuals list")]
    fn remove_usual(&self, Parameters(p): Parameters<RemoveUsualParams>) -> Result<CallToolResult, McpError> {
        let deleted = usuals::remove_usual(&self.database, p.id).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::json!({"success": deleted, "id": p.id}).to_string();
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Put a usual item on the grocery list. Skipped when an unchecked item with the same name is already there.")]
    fn add_usual_to_list(&self, Parameters(p): Parameters<AddUsualToListParams>) -> Result<CallToolResult, McpError> {
        let result = usuals::add_usual_to_list(&self.database, p.id).map_err(|e| McpError::internal_error(e, None))?;
        let json = match result {
            Some(resp) => serde_json::to_string_pretty(&resp),
            None => Ok(format!(r#"{{"error": "Usual item not found", "id": {}}}"#, p.id)),
        }.map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Share Links ---

    #[tool(description = "Create a share link for the grocery list, or return the existing active one. The code gives read-only access to the list, usuals, and recipes.")]
    fn create_share_link(&self) -> Result<CallToolResult, McpError> {
        let result = share::create_share_link(&self.database).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get the shared view of the grocery list by share code: items, store route (unchecked only), usuals, and recipe summaries")]
    fn get_shared_list(&self, Parameters(p): Parameters<GetSharedListParams>) -> Result<CallToolResult, McpError> {
        let result = share::get_shared_list(&self.database, &p.code).map_err(|e| McpError::internal_error(e, None))?;
        let json = match result {
            Some(resp) => serde_json::to_string_pretty(&resp),
            None => Ok(format!(r#"{{"error": "Share link not found or revoked", "code": "{}"}}"#, p.code)),
        }.map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Revoke all active share links. Existing codes stop working immediately.")]
    fn revoke_share_link(&self) -> Result<CallToolResult, McpError> {
        let result = share::revoke_share_link(&self.database).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for UgmService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "ugm".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Universal Grocery Manager".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Universal Grocery Manager (UGM) - Grocery list, store route sorting, recipes, and list sharing. \
                 IMPORTANT: Call grocery_instructions when starting a grocery session. \
                 Quantities live in item names ('2 bananen', '500g kipfilet'); there is no separate amount field. \
                 Groceries: add_grocery_item, list_grocery_items, toggle_grocery_item, remove_grocery_item, \
                 clear_checked_items, clear_all_items, merge_duplicate_items. \
                 Store route: get_store_route groups the list by supermarket walking order \
                 (produce, bread, fresh, pantry, non-food, frozen). \
                 Recipes: add/get/list/update/remove_recipe, set/clear_recipe_macros, \
                 add_recipe_to_grocery_list (scales ingredient quantities by servings). \
                 Usuals: add_usual, list_usuals, remove_usual, add_usual_to_list. \
                 Sharing: create_share_link, get_shared_list, revoke_share_link."
                    .into(),
            ),
        }
    }
}
