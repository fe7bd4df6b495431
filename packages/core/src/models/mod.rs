//! Data Models
//!
//! This module contains the typed wire schemas for every entity the
//! Orkestria backend exposes:
//!
//! - `ResourceRecord` / `ResourceNode` - resource inventory (flat and tree form)
//! - `Project`, `Task` - project management and kanban entities
//! - `User`, `Schedule`, `Reservation` - people and bookings
//!
//! The backend is loosely typed (ids arrive as numbers or strings depending
//! on the entity, `assignedUser` and `user` name the same field), so all
//! normalization happens here at the deserialization boundary. The rest of
//! the crate only ever sees the types below.

mod project;
mod resource;
mod schedule;
mod task;
mod user;

pub use project::{NewProject, Project, ProjectStatus};
pub use resource::{
    CreateResourceGroup, CreateResourceItem, ResourceGroupRecord, ResourceItemRecord,
    ResourceKind, ResourceNode, ResourceRecord, UpdateResourceName, ValidationError,
};
pub use schedule::{NewReservation, NewSchedule, Reservation, ResourceGroupRef, Schedule};
pub use task::{NewTask, Task, TaskPriority, TaskStatus, TaskType};
pub use user::{NewUser, User, UserRole};

pub(crate) mod wire {
    //! Deserialization helpers for the backend's loose id typing.
    //!
    //! Resource ids arrive as JSON numbers, task and project ids as strings,
    //! and some endpoints switch between the two. Everything is normalized
    //! to `String` on the way in.

    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Num(i64),
        Str(String),
    }

    pub fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawId::deserialize(deserializer)? {
            RawId::Num(n) => Ok(n.to_string()),
            RawId::Str(s) => Ok(s),
        }
    }

    pub fn opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<RawId> = Option::deserialize(deserializer)?;
        Ok(raw.map(|r| match r {
            RawId::Num(n) => n.to_string(),
            RawId::Str(s) => s,
        }))
    }

}
