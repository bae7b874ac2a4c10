//! Data models
//!
//! Rust structs representing database entities.

mod grocery_item;
mod macros;
mod recipe;
mod share_link;
mod usual;

pub use grocery_item::{GroceryItem, GroceryItemCreate};
pub use macros::Macros;
pub use recipe::{Recipe, RecipeCreate, RecipeUpdate};
pub use share_link::ShareLink;
pub use usual::UsualItem;
