//! Kanban Board Engine
//!
//! In-memory column buckets for a project's tasks. The board itself is
//! pure state: bucketing, moving and reverting are synchronous and
//! side-effect free. The optimistic network protocol around it lives in
//! [`crate::services::KanbanService`].

mod board;

pub use board::{KanbanBoard, KanbanColumn};
