//! Notification Reminders
//!
//! Browser-local reminders for schedule and reservation end times, redesigned
//! around an explicit registry instead of the old "localStorage as event bus"
//! pattern:
//!
//! - [`store`] - small key-value persistence seam (`get`/`set`/`delete`/
//!   `list_by_prefix`) with in-memory and JSON-file backends
//! - [`registry`] - owns the `notif:event:<id>` records and broadcasts every
//!   change to subscribers
//! - [`scheduler`] - one timer per enabled reminder; rebuilt wholesale on
//!   every registry change so reloads never double-fire
//!
//! Actual delivery (a desktop notification, a websocket push) is behind the
//! [`ReminderSink`](scheduler::ReminderSink) trait and out of scope here.

pub mod registry;
pub mod scheduler;
pub mod store;

pub use registry::{
    NotificationError, NotificationRegistry, Reminder, ReminderChange, ReminderKind,
};
pub use scheduler::{ReminderScheduler, ReminderSink};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore, StoreError};
