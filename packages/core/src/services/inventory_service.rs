//! Inventory Service - Resource Tree Synchronization
//!
//! Owns the in-memory resource forest and wraps every mutation in the
//! corresponding REST round-trip. The protocol is confirm-then-commit:
//!
//! 1. validate locally (empty names are rejected before any network call)
//! 2. issue the backend call
//! 3. only on a 2xx response, apply the mutation to the local forest
//!
//! On failure the forest is untouched and the error is returned for the
//! caller to surface inline. There is no rollback to perform because
//! nothing was committed, and there are no retries.
//!
//! Groups and items live in different backend collections; the service
//! picks the endpoint from the node's kind, which is why rename and delete
//! look the node up first.

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::api::ApiClient;
use crate::models::{
    CreateResourceGroup, CreateResourceItem, ResourceKind, ResourceNode, ResourceRecord,
    UpdateResourceName, ValidationError,
};
use crate::tree::{build_forest, create_child, delete_node, find_node, update_node, NodePatch};

use super::ServiceError;

/// Resource inventory state plus its remote sync adapter
pub struct InventoryService {
    client: ApiClient,
    forest: RwLock<Vec<ResourceNode>>,
}

impl InventoryService {
    pub fn new(client: ApiClient) -> Self {
        InventoryService {
            client,
            forest: RwLock::new(Vec::new()),
        }
    }

    /// Start from an already-built forest (server-rendered initial data).
    pub fn with_forest(client: ApiClient, forest: Vec<ResourceNode>) -> Self {
        InventoryService {
            client,
            forest: RwLock::new(forest),
        }
    }

    /// Fetch the flat group and item lists and rebuild the forest.
    ///
    /// The rebuild is always full; no incremental index survives a reload.
    pub async fn load(&self) -> Result<(), ServiceError> {
        let groups = self.client.list_resource_groups().await?;
        let items = self.client.list_resource_items().await?;

        let records: Vec<ResourceRecord> = groups
            .into_iter()
            .map(ResourceRecord::from)
            .chain(items.into_iter().map(ResourceRecord::from))
            .collect();

        let forest = build_forest(&records);
        debug!(records = records.len(), roots = forest.len(), "inventory reloaded");
        *self.forest.write().await = forest;
        Ok(())
    }

    /// Current forest value for the presentation layer.
    pub async fn snapshot(&self) -> Vec<ResourceNode> {
        self.forest.read().await.clone()
    }

    /// Create a root group.
    pub async fn create_root(&self, name: &str) -> Result<ResourceNode, ServiceError> {
        validate_name(name)?;

        let created = self
            .client
            .create_resource_group(&CreateResourceGroup {
                name: name.to_string(),
                parent_id: None,
            })
            .await?;

        let node = ResourceNode::group(created.id, name);
        let mut forest = self.forest.write().await;
        *forest = create_child(&forest, None, node.clone());
        info!(id = %node.id, "created root resource group");
        Ok(node)
    }

    /// Create a group under an existing group.
    pub async fn create_group(
        &self,
        parent_id: &str,
        name: &str,
    ) -> Result<ResourceNode, ServiceError> {
        validate_name(name)?;
        self.require_group(parent_id).await?;

        let created = self
            .client
            .create_resource_group(&CreateResourceGroup {
                name: name.to_string(),
                parent_id: Some(parent_id.to_string()),
            })
            .await?;

        let node = ResourceNode::group(created.id, name);
        let mut forest = self.forest.write().await;
        *forest = create_child(&forest, Some(parent_id), node.clone());
        info!(id = %node.id, parent = parent_id, "created resource group");
        Ok(node)
    }

    /// Create a leaf item under an existing group.
    pub async fn create_item(
        &self,
        parent_id: &str,
        name: &str,
    ) -> Result<ResourceNode, ServiceError> {
        validate_name(name)?;
        self.require_group(parent_id).await?;

        let created = self
            .client
            .create_resource_item(&CreateResourceItem {
                name: name.to_string(),
                group_id: parent_id.to_string(),
            })
            .await?;

        let node = ResourceNode::item(created.id, name);
        let mut forest = self.forest.write().await;
        *forest = create_child(&forest, Some(parent_id), node.clone());
        info!(id = %node.id, parent = parent_id, "created resource item");
        Ok(node)
    }

    /// Rename a node (the only supported edit).
    pub async fn rename(&self, id: &str, name: &str) -> Result<(), ServiceError> {
        validate_name(name)?;
        let kind = self.kind_of(id).await?;

        let update = UpdateResourceName {
            name: name.to_string(),
        };
        match kind {
            ResourceKind::Group => self.client.update_resource_group(id, &update).await?,
            ResourceKind::Item => self.client.update_resource_item(id, &update).await?,
        }

        let mut forest = self.forest.write().await;
        *forest = update_node(&forest, id, &NodePatch::rename(name));
        Ok(())
    }

    /// Delete a node; its whole subtree goes with it.
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let kind = self.kind_of(id).await?;

        match kind {
            ResourceKind::Group => self.client.delete_resource_group(id).await?,
            ResourceKind::Item => self.client.delete_resource_item(id).await?,
        }

        let mut forest = self.forest.write().await;
        *forest = delete_node(&forest, id);
        info!(id, "deleted resource and subtree");
        Ok(())
    }

    async fn kind_of(&self, id: &str) -> Result<ResourceKind, ServiceError> {
        let forest = self.forest.read().await;
        find_node(&forest, id)
            .map(|node| node.kind)
            .ok_or_else(|| ServiceError::node_not_found(id))
    }

    async fn require_group(&self, id: &str) -> Result<(), ServiceError> {
        match self.kind_of(id).await? {
            ResourceKind::Group => Ok(()),
            ResourceKind::Item => Err(ServiceError::not_a_group(id)),
        }
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::missing_field("name"));
    }
    Ok(())
}
