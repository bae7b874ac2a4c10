//! Supermarket walking route
//!
//! Categorization and grouping of items by store section.

pub mod categories;
pub mod sort;

pub use categories::{categorize, RouteCategory, ROUTE_ORDER};
pub use sort::{sort_by_store_route, Named, RouteGroup};
