//! Tree Mutator
//!
//! Create/update/delete over a forest, expressed as pure functions. Every
//! operation returns a new forest and leaves the input untouched; the path
//! from the affected node up to the root is rebuilt, so the previous forest
//! value stays valid for any view still holding it.
//!
//! Operations targeting an id that does not exist anywhere in the forest
//! are no-ops (the returned forest is structurally equal to the input).

use crate::models::ResourceNode;

/// Mutable fields of a node
///
/// Renaming is the only edit the inventory supports; the patch struct keeps
/// the call sites honest about that.
#[derive(Debug, Clone, Default)]
pub struct NodePatch {
    pub name: Option<String>,
}

impl NodePatch {
    pub fn rename(name: impl Into<String>) -> Self {
        NodePatch {
            name: Some(name.into()),
        }
    }

    fn apply(&self, node: &ResourceNode) -> ResourceNode {
        ResourceNode {
            id: node.id.clone(),
            name: self.name.clone().unwrap_or_else(|| node.name.clone()),
            kind: node.kind,
            children: node.children.clone(),
        }
    }
}

/// Replace the mutable fields of the node matching `id`, preserving its
/// children. Depth-first; no-op if the id is not found.
pub fn update_node(forest: &[ResourceNode], id: &str, patch: &NodePatch) -> Vec<ResourceNode> {
    forest
        .iter()
        .map(|node| {
            if node.id == id {
                patch.apply(node)
            } else {
                ResourceNode {
                    id: node.id.clone(),
                    name: node.name.clone(),
                    kind: node.kind,
                    children: update_node(&node.children, id, patch),
                }
            }
        })
        .collect()
}

/// Remove the node matching `id` together with its entire subtree.
/// No-op if the id is not found.
pub fn delete_node(forest: &[ResourceNode], id: &str) -> Vec<ResourceNode> {
    forest
        .iter()
        .filter(|node| node.id != id)
        .map(|node| ResourceNode {
            id: node.id.clone(),
            name: node.name.clone(),
            kind: node.kind,
            children: delete_node(&node.children, id),
        })
        .collect()
}

/// Append `child` under the node matching `parent_id`, or to the root
/// sequence when `parent_id` is `None`.
///
/// A `parent_id` that matches no group in the forest leaves the forest
/// unchanged; a node that exists but cannot own children (an item) is
/// likewise left alone.
pub fn create_child(
    forest: &[ResourceNode],
    parent_id: Option<&str>,
    child: ResourceNode,
) -> Vec<ResourceNode> {
    match parent_id {
        None => {
            let mut roots = forest.to_vec();
            roots.push(child);
            roots
        }
        Some(parent_id) => forest
            .iter()
            .map(|node| {
                if node.id == parent_id && node.kind.can_have_children() {
                    let mut updated = node.clone();
                    updated.children.push(child.clone());
                    updated
                } else {
                    ResourceNode {
                        id: node.id.clone(),
                        name: node.name.clone(),
                        kind: node.kind,
                        children: create_child(&node.children, Some(parent_id), child.clone()),
                    }
                }
            })
            .collect(),
    }
}

/// Depth-first lookup of a node by id.
pub fn find_node<'a>(forest: &'a [ResourceNode], id: &str) -> Option<&'a ResourceNode> {
    for node in forest {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_node(&node.children, id) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResourceRecord;
    use crate::models::{ResourceKind, ResourceNode};
    use crate::tree::build_forest;

    fn sample_forest() -> Vec<ResourceNode> {
        let records = vec![
            ResourceRecord {
                id: "1".into(),
                name: "A".into(),
                parent_id: None,
                kind: ResourceKind::Group,
                is_reservable: false,
            },
            ResourceRecord {
                id: "2".into(),
                name: "B".into(),
                parent_id: Some("1".into()),
                kind: ResourceKind::Group,
                is_reservable: false,
            },
            ResourceRecord {
                id: "3".into(),
                name: "C".into(),
                parent_id: Some("2".into()),
                kind: ResourceKind::Item,
                is_reservable: false,
            },
        ];
        build_forest(&records)
    }

    #[test]
    fn update_renames_in_place_and_preserves_children() {
        let forest = sample_forest();

        let updated = update_node(&forest, "2", &NodePatch::rename("B renamed"));

        let b = find_node(&updated, "2").unwrap();
        assert_eq!(b.name, "B renamed");
        assert_eq!(b.children.len(), 1);
        // Prior forest value is untouched.
        assert_eq!(find_node(&forest, "2").unwrap().name, "B");
    }

    #[test]
    fn update_unknown_id_is_a_noop() {
        let forest = sample_forest();
        let updated = update_node(&forest, "nope", &NodePatch::rename("x"));
        assert_eq!(updated, forest);
    }

    #[test]
    fn delete_discards_the_subtree() {
        let forest = sample_forest();

        let updated = delete_node(&forest, "2");

        assert!(find_node(&updated, "2").is_none());
        assert!(find_node(&updated, "3").is_none());
        assert!(find_node(&updated, "1").is_some());
    }

    #[test]
    fn delete_then_update_is_a_noop() {
        let forest = sample_forest();
        let deleted = delete_node(&forest, "3");
        let updated = update_node(&deleted, "3", &NodePatch::rename("ghost"));
        assert_eq!(updated, deleted);
    }

    #[test]
    fn create_then_delete_restores_the_original() {
        let forest = sample_forest();

        let grown = create_child(&forest, Some("2"), ResourceNode::item("9", "New"));
        assert_eq!(find_node(&grown, "2").unwrap().children.len(), 2);

        let restored = delete_node(&grown, "9");
        assert_eq!(restored, forest);
    }

    #[test]
    fn create_without_parent_appends_to_roots() {
        let forest = sample_forest();
        let grown = create_child(&forest, None, ResourceNode::group("9", "Second root"));
        assert_eq!(grown.len(), 2);
        assert_eq!(grown[1].id, "9");
    }

    #[test]
    fn create_under_item_or_unknown_parent_is_a_noop() {
        let forest = sample_forest();
        // "3" is an item, "404" does not exist.
        assert_eq!(
            create_child(&forest, Some("3"), ResourceNode::item("9", "x")),
            forest
        );
        assert_eq!(
            create_child(&forest, Some("404"), ResourceNode::item("9", "x")),
            forest
        );
    }

    #[test]
    fn find_is_depth_first() {
        let forest = sample_forest();
        assert_eq!(find_node(&forest, "3").unwrap().name, "C");
        assert!(find_node(&forest, "404").is_none());
    }
}
