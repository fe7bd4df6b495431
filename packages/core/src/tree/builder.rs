//! Tree Builder
//!
//! Reconstructs the inventory forest from the flat record lists the backend
//! returns. The builder never fails: malformed references degrade instead.
//!
//! # Leniency policy
//!
//! - A `parent_id` that matches no known record (dangling reference) turns
//!   the node into a root. The record stays visible rather than silently
//!   disappearing.
//! - A `parent_id` pointing at an item does the same: items never own
//!   children.
//! - Duplicate ids resolve last-write-wins: the later record's content
//!   replaces the earlier one (kept at the earlier position).
//! - Members of a parent cycle are unreachable from any root; the cycle is
//!   broken at its first member in input order, which becomes a root.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::models::{ResourceKind, ResourceNode, ResourceRecord};

/// Build a forest from flat records, resolving `parent_id` references.
///
/// Input order is preserved both for the root sequence and for every
/// child list.
pub fn build_forest(records: &[ResourceRecord]) -> Vec<ResourceNode> {
    let mut by_id: HashMap<&str, &ResourceRecord> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for record in records {
        if by_id.insert(record.id.as_str(), record).is_none() {
            order.push(record.id.as_str());
        }
    }

    let mut child_ids: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut roots: Vec<&str> = Vec::new();
    for &id in &order {
        let record = by_id[id];
        match record.parent_id.as_deref() {
            Some(parent)
                if parent != id
                    && by_id
                        .get(parent)
                        .is_some_and(|p| p.kind.can_have_children()) =>
            {
                child_ids.entry(parent).or_default().push(id);
            }
            Some(parent) => {
                debug!(node = id, parent, "unresolvable parent, degrading node to root");
                roots.push(id);
            }
            None => roots.push(id),
        }
    }

    let mut built: HashSet<&str> = HashSet::new();
    let mut forest: Vec<ResourceNode> = roots
        .iter()
        .map(|&id| assemble(id, &by_id, &mut child_ids, &mut built))
        .collect();

    for &id in &order {
        if !built.contains(id) {
            debug!(node = id, "parent cycle detected, degrading node to root");
            forest.push(assemble(id, &by_id, &mut child_ids, &mut built));
        }
    }

    forest
}

fn assemble<'a>(
    id: &'a str,
    by_id: &HashMap<&'a str, &'a ResourceRecord>,
    child_ids: &mut HashMap<&'a str, Vec<&'a str>>,
    built: &mut HashSet<&'a str>,
) -> ResourceNode {
    built.insert(id);
    let record = by_id[id];
    let mut node = match record.kind {
        ResourceKind::Group => ResourceNode::group(record.id.as_str(), record.name.as_str()),
        ResourceKind::Item => ResourceNode::item(record.id.as_str(), record.name.as_str()),
    };
    for child in child_ids.remove(id).unwrap_or_default() {
        if !built.contains(child) {
            node.children.push(assemble(child, by_id, child_ids, built));
        }
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(id: &str, name: &str, parent: Option<&str>) -> ResourceRecord {
        ResourceRecord {
            id: id.to_string(),
            name: name.to_string(),
            parent_id: parent.map(str::to_string),
            kind: ResourceKind::Group,
            is_reservable: false,
        }
    }

    fn item(id: &str, name: &str, parent: &str) -> ResourceRecord {
        ResourceRecord {
            id: id.to_string(),
            name: name.to_string(),
            parent_id: Some(parent.to_string()),
            kind: ResourceKind::Item,
            is_reservable: false,
        }
    }

    #[test]
    fn chain_of_three_builds_nested_tree() {
        let records = vec![
            group("1", "A", None),
            group("2", "B", Some("1")),
            group("3", "C", Some("2")),
        ];

        let forest = build_forest(&records);

        assert_eq!(forest.len(), 1);
        let a = &forest[0];
        assert_eq!(a.name, "A");
        assert_eq!(a.children.len(), 1);
        let b = &a.children[0];
        assert_eq!(b.name, "B");
        assert_eq!(b.children.len(), 1);
        assert_eq!(b.children[0].name, "C");
        assert!(b.children[0].children.is_empty());
    }

    #[test]
    fn every_non_root_appears_exactly_once_under_its_parent() {
        let records = vec![
            group("r1", "Root 1", None),
            group("r2", "Root 2", None),
            item("i1", "Item 1", "r1"),
            item("i2", "Item 2", "r1"),
            item("i3", "Item 3", "r2"),
        ];

        let forest = build_forest(&records);

        assert_eq!(forest.len(), 2);
        assert_eq!(
            forest[0].children.iter().map(|n| n.id.as_str()).collect::<Vec<_>>(),
            vec!["i1", "i2"]
        );
        assert_eq!(forest[1].children[0].id, "i3");

        fn count(nodes: &[ResourceNode]) -> usize {
            nodes.iter().map(|n| 1 + count(&n.children)).sum()
        }
        assert_eq!(count(&forest), records.len());
    }

    #[test]
    fn dangling_parent_degrades_to_root() {
        let records = vec![group("1", "A", None), group("2", "B", Some("missing"))];

        let forest = build_forest(&records);

        assert_eq!(forest.len(), 2);
        assert_eq!(forest[1].name, "B");
        assert!(forest[1].children.is_empty());
    }

    #[test]
    fn item_cannot_be_a_parent() {
        let records = vec![
            group("g", "Group", None),
            item("i", "Item", "g"),
            group("orphan", "Under item", Some("i")),
        ];

        let forest = build_forest(&records);

        // The group pointing at an item becomes a root; the item stays a leaf.
        assert_eq!(forest.len(), 2);
        assert!(forest[0].children[0].children.is_empty());
        assert_eq!(forest[1].id, "orphan");
    }

    #[test]
    fn duplicate_id_last_write_wins() {
        let records = vec![
            group("1", "First", None),
            group("2", "Other", None),
            group("1", "Second", None),
        ];

        let forest = build_forest(&records);

        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].name, "Second");
        assert_eq!(forest[1].name, "Other");
    }

    #[test]
    fn parent_cycle_is_broken_not_dropped() {
        let records = vec![group("a", "A", Some("b")), group("b", "B", Some("a"))];

        let forest = build_forest(&records);

        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].id, "a");
        assert_eq!(forest[0].children[0].id, "b");
        assert!(forest[0].children[0].children.is_empty());
    }

    #[test]
    fn empty_input_yields_empty_forest() {
        assert!(build_forest(&[]).is_empty());
    }
}
