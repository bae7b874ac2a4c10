//! Duplicate merging
//!
//! Plans the collapse of repeated list entries ("2 bananen" + "3 bananen")
//! into a single line with a summed quantity. The planner is pure; applying
//! the deletes and renames is the caller's job.

use std::collections::HashMap;

use serde::Serialize;

use super::parser::{format_quantity, parse_quantity, DecimalSeparator};

/// A list row as the merge planner sees it
#[derive(Debug, Clone)]
pub struct MergeCandidate {
    pub id: i64,
    pub name: String,
    pub checked: bool,
}

/// A pending rename in a merge plan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rename {
    pub id: i64,
    pub new_name: String,
}

/// The deletes and renames a merge application must perform
#[derive(Debug, Clone, Default, Serialize)]
pub struct MergePlan {
    pub to_delete: Vec<i64>,
    pub to_rename: Vec<Rename>,
}

impl MergePlan {
    /// True when the plan changes nothing
    pub fn is_empty(&self) -> bool {
        self.to_delete.is_empty() && self.to_rename.is_empty()
    }
}

/// Plan the merge of duplicate unchecked items.
///
/// Items group by their parsed base name; the first item of each group
/// survives and the rest are deleted. When every member of a group carries
/// a quantity the survivor is renamed to the formatted sum ("2 bananen" +
/// "3 bananen" → "5 bananen"); a group with any unquantified member keeps
/// the survivor's name untouched. Checked items never take part,
/// whatever their names.
pub fn merge_duplicates(items: &[MergeCandidate], sep: DecimalSeparator) -> MergePlan {
    // Group by base name, keeping first-seen order for deterministic plans
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<(i64, Option<f64>)>> = HashMap::new();

    for item in items {
        if item.checked {
            continue;
        }
        let parsed = parse_quantity(&item.name);
        if !groups.contains_key(&parsed.base) {
            order.push(parsed.base.clone());
        }
        groups.entry(parsed.base).or_default().push((item.id, parsed.qty));
    }

    let mut plan = MergePlan::default();

    for base in order {
        let members = groups.remove(&base).unwrap_or_default();
        if members.len() < 2 {
            continue;
        }

        plan.to_delete.extend(members[1..].iter().map(|(id, _)| *id));

        // Sum is None as soon as any member lacks a quantity
        let total: Option<f64> = members.iter().map(|(_, qty)| *qty).sum();
        if let Some(total) = total {
            plan.to_rename.push(Rename {
                id: members[0].0,
                new_name: format!("{} {}", format_quantity(total, sep), base),
            });
        }
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unchecked(id: i64, name: &str) -> MergeCandidate {
        MergeCandidate {
            id,
            name: name.to_string(),
            checked: false,
        }
    }

    fn checked(id: i64, name: &str) -> MergeCandidate {
        MergeCandidate {
            id,
            name: name.to_string(),
            checked: true,
        }
    }

    #[test]
    fn test_sums_quantities_into_keeper() {
        let items = [
            unchecked(1, "2 bananen"),
            unchecked(2, "3 bananen"),
            unchecked(3, "appel"),
        ];
        let plan = merge_duplicates(&items, DecimalSeparator::Comma);

        assert_eq!(plan.to_delete, vec![2]);
        assert_eq!(
            plan.to_rename,
            vec![Rename { id: 1, new_name: "5 bananen".to_string() }]
        );
    }

    #[test]
    fn test_dedup_without_quantities_keeps_name() {
        let items = [unchecked(1, "bananen"), unchecked(2, "bananen")];
        let plan = merge_duplicates(&items, DecimalSeparator::Comma);

        assert_eq!(plan.to_delete, vec![2]);
        assert!(plan.to_rename.is_empty());
    }

    #[test]
    fn test_mixed_group_dedups_without_rename() {
        let items = [unchecked(1, "2 bananen"), unchecked(2, "bananen")];
        let plan = merge_duplicates(&items, DecimalSeparator::Comma);

        assert_eq!(plan.to_delete, vec![2]);
        assert!(plan.to_rename.is_empty());
    }

    #[test]
    fn test_checked_items_never_merge() {
        let items = [
            unchecked(1, "2 bananen"),
            checked(2, "3 bananen"),
            checked(3, "melk"),
            checked(4, "melk"),
        ];
        let plan = merge_duplicates(&items, DecimalSeparator::Comma);

        assert!(plan.is_empty());
    }

    #[test]
    fn test_grouping_is_case_insensitive() {
        let items = [unchecked(1, "2 Bananen"), unchecked(2, "3 bananen")];
        let plan = merge_duplicates(&items, DecimalSeparator::Comma);

        assert_eq!(plan.to_delete, vec![2]);
        assert_eq!(plan.to_rename[0].new_name, "5 bananen");
    }

    #[test]
    fn test_three_way_merge_keeps_first() {
        let items = [
            unchecked(7, "1 melk"),
            unchecked(8, "2 melk"),
            unchecked(9, "3 melk"),
        ];
        let plan = merge_duplicates(&items, DecimalSeparator::Comma);

        assert_eq!(plan.to_delete, vec![8, 9]);
        assert_eq!(
            plan.to_rename,
            vec![Rename { id: 7, new_name: "6 melk".to_string() }]
        );
    }

    #[test]
    fn test_fractional_sum_uses_separator() {
        let items = [unchecked(1, "1,5 kg bloem"), unchecked(2, "1 kg bloem")];

        let plan = merge_duplicates(&items, DecimalSeparator::Comma);
        assert_eq!(plan.to_rename[0].new_name, "2,5 kg bloem");

        let plan = merge_duplicates(&items, DecimalSeparator::Period);
        assert_eq!(plan.to_rename[0].new_name, "2.5 kg bloem");
    }

    #[test]
    fn test_no_duplicates_means_empty_plan() {
        let items = [unchecked(1, "appel"), unchecked(2, "melk")];
        let plan = merge_duplicates(&items, DecimalSeparator::Comma);

        assert!(plan.is_empty());
    }
}
