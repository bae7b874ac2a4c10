//! Store route grouping
//!
//! Buckets a flat list of items into walking-route sections.

use serde::Serialize;

use super::categories::{categorize, RouteCategory, ROUTE_ORDER};
use crate::models::{GroceryItem, UsualItem};

/// Anything with a display name that can be routed through the store
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for GroceryItem {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for UsualItem {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for String {
    fn name(&self) -> &str {
        self
    }
}

impl Named for &str {
    fn name(&self) -> &str {
        self
    }
}

/// One non-empty section of the walking route
#[derive(Debug, Clone, Serialize)]
pub struct RouteGroup<T> {
    pub category: RouteCategory,
    pub label: &'static str,
    pub items: Vec<T>,
}

/// Group items by store section, in walking order.
///
/// Every item lands in exactly one bucket; buckets come back in route order
/// with empty sections skipped, and items keep their input order inside
/// each bucket.
pub fn sort_by_store_route<T: Named>(items: Vec<T>) -> Vec<RouteGroup<T>> {
    let mut groups: Vec<RouteGroup<T>> = ROUTE_ORDER
        .iter()
        .map(|&category| RouteGroup {
            category,
            label: category.label(),
            items: Vec::new(),
        })
        .collect();

    for item in items {
        let category = categorize(item.name());
        if let Some(group) = groups.iter_mut().find(|g| g.category == category) {
            group.items.push(item);
        }
    }

    groups.retain(|g| !g.items.is_empty());
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_follow_route_order() {
        let groups = sort_by_store_route(vec!["melk", "appel", "brood"]);

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].category, RouteCategory::GroenteFruit);
        assert_eq!(groups[0].items, vec!["appel"]);
        assert_eq!(groups[1].category, RouteCategory::Brood);
        assert_eq!(groups[1].items, vec!["brood"]);
        assert_eq!(groups[2].category, RouteCategory::Vers);
        assert_eq!(groups[2].items, vec!["melk"]);
    }

    #[test]
    fn test_empty_sections_are_skipped() {
        let groups = sort_by_store_route(vec!["appel"]);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].category, RouteCategory::GroenteFruit);
        assert_eq!(groups[0].label, "🥬 Groente & Fruit");
    }

    #[test]
    fn test_no_items_dropped_or_duplicated() {
        let items = vec!["appel", "fietsbel", "melk", "shampoo", "ijs", "brood", "xyzzy"];
        let total = items.len();

        let groups = sort_by_store_route(items);
        let grouped: usize = groups.iter().map(|g| g.items.len()).sum();

        assert_eq!(grouped, total);
    }

    #[test]
    fn test_stable_within_section() {
        let groups = sort_by_store_route(vec!["appel", "2 bananen", "druiven"]);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].items, vec!["appel", "2 bananen", "druiven"]);
    }

    #[test]
    fn test_empty_input() {
        let groups = sort_by_store_route(Vec::<String>::new());
        assert!(groups.is_empty());
    }

    #[test]
    fn test_unknown_items_land_in_houdbaar() {
        let groups = sort_by_store_route(vec!["fietsbel"]);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].category, RouteCategory::Houdbaar);
    }
}
