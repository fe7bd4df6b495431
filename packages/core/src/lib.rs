//! Orkestria Dashboard Core
//!
//! This crate provides the state management and backend synchronization
//! layer for the Orkestria project/resource dashboard. The REST backend and
//! the rendered pages are external collaborators; everything in between
//! lives here: typed wire schemas, the resource tree, the kanban board and
//! reminder scheduling.
//!
//! # Architecture
//!
//! - **Typed boundary**: loosely-shaped backend payloads are normalized
//!   into the [`models`] types at deserialization time and nowhere else
//! - **Confirm-then-commit**: tree mutations hit the backend first and
//!   apply locally only on success ([`services::InventoryService`])
//! - **Optimistic kanban**: the one exception, card moves apply instantly
//!   and roll back exactly on failure ([`services::KanbanService`])
//! - **Rebuild over reconcile**: the forest and the reminder timers are
//!   rebuilt wholesale from flat state, never patched incrementally
//!
//! # Modules
//!
//! - [`models`] - wire schemas (resources, projects, tasks, users, bookings)
//! - [`tree`] - forest builder and non-destructive mutator
//! - [`kanban`] - column buckets and move/revert state
//! - [`api`] - REST client with uniform non-2xx failure handling
//! - [`services`] - sync protocols over the state engines
//! - [`notifications`] - reminder registry, persistence seam and scheduler
//! - [`config`] - backend base URL resolution

pub mod api;
pub mod config;
pub mod kanban;
pub mod models;
pub mod notifications;
pub mod services;
pub mod tree;

// Re-export commonly used types
pub use api::{ApiClient, ApiError};
pub use config::ApiConfig;
pub use kanban::{KanbanBoard, KanbanColumn};
pub use models::*;
pub use notifications::{NotificationRegistry, Reminder, ReminderScheduler};
pub use services::{InventoryService, KanbanService, ServiceError};
pub use tree::build_forest;
