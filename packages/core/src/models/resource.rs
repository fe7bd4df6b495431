//! Resource Inventory Models
//!
//! The backend stores the inventory as two flat collections (resource
//! groups and resource items) linked by parent references. The tree shape
//! shown on the inventory page never travels over the wire: it is rebuilt
//! locally from the flat records (see [`crate::tree`]).
//!
//! - `ResourceGroupRecord` / `ResourceItemRecord` - wire records as the
//!   backend returns them
//! - `ResourceRecord` - unified flat record (groups and items) fed to the
//!   tree builder
//! - `ResourceNode` - tree node owned by its parent; deliberately not
//!   deserializable so nested payloads can never be trusted by accident

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::wire;

/// Validation errors for locally constructed entities
///
/// These correspond to the "local validation failure" error class: they are
/// raised before any network call is made.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// An item node was given children
    #[error("Resource item {id} cannot own children")]
    ChildrenOnItem { id: String },
}

impl ValidationError {
    pub fn missing_field(name: impl Into<String>) -> Self {
        Self::MissingField(name.into())
    }
}

/// Discriminates groups (interior nodes) from items (leaves)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Group,
    Item,
}

impl ResourceKind {
    /// Only groups may own children
    pub fn can_have_children(&self) -> bool {
        matches!(self, ResourceKind::Group)
    }
}

/// Resource group as returned by `GET /api/resource-groups`
///
/// Group ids arrive as JSON numbers; they are normalized to strings here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceGroupRecord {
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "wire::opt_id")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub is_reservable: bool,
}

/// Resource item as returned by `GET /api/resource-items`
///
/// Items hang off a group via `groupId` and are always leaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceItemRecord {
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "wire::opt_id")]
    pub group_id: Option<String>,
}

/// Unified flat record fed to the tree builder
///
/// Both wire record types convert into this; `parent_id` is the group's
/// `parentId` or the item's `groupId`. A missing `parent_id` marks a root.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRecord {
    pub id: String,
    pub name: String,
    pub parent_id: Option<String>,
    pub kind: ResourceKind,
    pub is_reservable: bool,
}

impl From<ResourceGroupRecord> for ResourceRecord {
    fn from(group: ResourceGroupRecord) -> Self {
        ResourceRecord {
            id: group.id,
            name: group.name,
            parent_id: group.parent_id,
            kind: ResourceKind::Group,
            is_reservable: group.is_reservable,
        }
    }
}

impl From<ResourceItemRecord> for ResourceRecord {
    fn from(item: ResourceItemRecord) -> Self {
        ResourceRecord {
            id: item.id,
            name: item.name,
            parent_id: item.group_id,
            kind: ResourceKind::Item,
            is_reservable: false,
        }
    }
}

/// A node of the rebuilt inventory forest
///
/// `children` is owned exclusively by the parent and is always the product
/// of a local rebuild. The type is serializable for the presentation layer
/// but intentionally not deserializable: nested `children` arriving in a
/// payload must never be trusted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ResourceNode>,
}

impl ResourceNode {
    /// Create a group node with no children yet
    pub fn group(id: impl Into<String>, name: impl Into<String>) -> Self {
        ResourceNode {
            id: id.into(),
            name: name.into(),
            kind: ResourceKind::Group,
            children: Vec::new(),
        }
    }

    /// Create a leaf item node
    pub fn item(id: impl Into<String>, name: impl Into<String>) -> Self {
        ResourceNode {
            id: id.into(),
            name: name.into(),
            kind: ResourceKind::Item,
            children: Vec::new(),
        }
    }

    /// Check the node's structural invariants
    ///
    /// - `name` must be non-empty
    /// - item nodes must not carry children
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::missing_field("name"));
        }
        if !self.kind.can_have_children() && !self.children.is_empty() {
            return Err(ValidationError::ChildrenOnItem {
                id: self.id.clone(),
            });
        }
        Ok(())
    }
}

/// Body for `POST /api/resource-groups`
///
/// `parentId` is serialized explicitly (null for a root group), matching
/// what the backend expects.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResourceGroup {
    pub name: String,
    pub parent_id: Option<String>,
}

/// Body for `POST /api/resource-items`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResourceItem {
    pub name: String,
    pub group_id: String,
}

/// Body for `PUT /api/resource-groups/{id}` and `PUT /api/resource-items/{id}`
///
/// Rename is the only supported edit.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateResourceName {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_record_accepts_numeric_ids() {
        let json = r#"{"id": 3, "name": "Sala A", "parentId": 1, "isReservable": true}"#;
        let record: ResourceGroupRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "3");
        assert_eq!(record.parent_id, Some("1".to_string()));
        assert!(record.is_reservable);
    }

    #[test]
    fn group_record_without_parent_is_root() {
        let json = r#"{"id": "g1", "name": "Edificio"}"#;
        let record: ResourceGroupRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.parent_id, None);
        assert!(!record.is_reservable);

        let flat: ResourceRecord = record.into();
        assert_eq!(flat.kind, ResourceKind::Group);
        assert_eq!(flat.parent_id, None);
    }

    #[test]
    fn item_record_parents_under_its_group() {
        let json = r#"{"id": 9, "name": "Proyector", "groupId": 3}"#;
        let record: ResourceItemRecord = serde_json::from_str(json).unwrap();

        let flat: ResourceRecord = record.into();
        assert_eq!(flat.kind, ResourceKind::Item);
        assert_eq!(flat.parent_id, Some("3".to_string()));
    }

    #[test]
    fn empty_name_fails_validation() {
        let node = ResourceNode::group("1", "   ");
        assert_eq!(
            node.validate(),
            Err(ValidationError::MissingField("name".to_string()))
        );
    }

    #[test]
    fn item_with_children_fails_validation() {
        let mut node = ResourceNode::item("1", "Leaf");
        node.children.push(ResourceNode::item("2", "Nested"));
        assert!(matches!(
            node.validate(),
            Err(ValidationError::ChildrenOnItem { .. })
        ));
    }

    #[test]
    fn node_serializes_with_wire_field_names() {
        let mut root = ResourceNode::group("1", "A");
        root.children.push(ResourceNode::item("2", "B"));

        let json = serde_json::to_value(&root).unwrap();
        assert_eq!(json["type"], "group");
        assert_eq!(json["children"][0]["type"], "item");
        // Leaves omit the empty children array entirely.
        assert!(json["children"][0].get("children").is_none());
    }
}
