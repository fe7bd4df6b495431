//! Business Services
//!
//! Services tie the pure state engines to the REST backend:
//!
//! - `InventoryService` - resource forest with confirm-then-commit sync
//! - `KanbanService` - task board with optimistic move and rollback
//!
//! Both follow the same discipline: the UI issues one operation at a time
//! per control, failures surface as an error value and never retry, and no
//! failure is fatal to the application.

pub mod error;
pub mod inventory_service;
pub mod kanban_service;

pub use error::ServiceError;
pub use inventory_service::InventoryService;
pub use kanban_service::KanbanService;
