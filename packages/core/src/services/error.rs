//! Service Layer Error Types

use thiserror::Error;

use crate::api::ApiError;
use crate::models::ValidationError;

/// Service operation errors
///
/// Every variant maps to one of the three user-visible failure classes:
/// local validation, network/HTTP failure, or a stale local reference
/// (the targeted node/task is no longer where the caller thinks it is).
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Local validation failed before any network call was made
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The backend call failed; local state was left untouched or rolled back
    #[error("Backend call failed: {0}")]
    Api(#[from] ApiError),

    /// No node with this id exists in the current forest
    #[error("Resource not found: {id}")]
    NodeNotFound { id: String },

    /// The node exists but is an item, which cannot own children
    #[error("Resource {id} is an item and cannot contain resources")]
    NotAGroup { id: String },

    /// The task is not in the column the caller claims it is
    #[error("Task {id} not found in column \"{column}\"")]
    TaskNotFound { id: String, column: &'static str },
}

impl ServiceError {
    pub fn node_not_found(id: impl Into<String>) -> Self {
        Self::NodeNotFound { id: id.into() }
    }

    pub fn not_a_group(id: impl Into<String>) -> Self {
        Self::NotAGroup { id: id.into() }
    }

    pub fn task_not_found(id: impl Into<String>, column: &'static str) -> Self {
        Self::TaskNotFound {
            id: id.into(),
            column,
        }
    }
}
