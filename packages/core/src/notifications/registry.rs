//! Notification Registry
//!
//! Single owner of the reminder records. Each enabled reminder is one store
//! entry keyed `notif:event:<id>`; the presence of the key is the enabled
//! flag. Every mutation is broadcast on a channel so the scheduler (and any
//! other open view) can re-read without polling: the observable-store
//! replacement for the old cross-view custom event.
//!
//! Stored records that fail to parse are skipped, not deleted: a newer
//! session may understand them.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::debug;

use super::store::{KeyValueStore, StoreError};

/// Store key prefix for reminder records
pub const KEY_PREFIX: &str = "notif:event:";

/// Broadcast channel capacity; subscribers that lag simply re-read the
/// registry, so a small buffer is enough.
const CHANNEL_CAPACITY: usize = 16;

/// Notification subsystem errors
#[derive(Error, Debug)]
pub enum NotificationError {
    /// The backing store failed
    #[error("Reminder store failed: {0}")]
    Store(#[from] StoreError),

    /// A reminder could not be serialized for storage
    #[error("Reminder serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// What a reminder is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderKind {
    Employee,
    Reservation,
}

/// One enabled reminder, stored as JSON under `notif:event:<id>`
///
/// `end` is when the underlying event finishes, which is when the reminder
/// fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: String,
    pub title: String,
    pub end: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: ReminderKind,
}

/// Change notice sent to subscribers after each committed mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderChange {
    Enabled { id: String },
    Disabled { id: String },
}

/// Owner of the reminder records and their change feed
pub struct NotificationRegistry {
    store: Arc<dyn KeyValueStore>,
    changes: broadcast::Sender<ReminderChange>,
}

impl NotificationRegistry {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let (changes, _) = broadcast::channel(CHANNEL_CAPACITY);
        NotificationRegistry { store, changes }
    }

    fn key(id: &str) -> String {
        format!("{KEY_PREFIX}{id}")
    }

    /// Subscribe to the change feed. Safe to call before or after mutations;
    /// a lagged subscriber should re-read the registry.
    pub fn subscribe(&self) -> broadcast::Receiver<ReminderChange> {
        self.changes.subscribe()
    }

    /// Enable a reminder (idempotent: enabling twice overwrites the record).
    pub async fn enable(&self, reminder: Reminder) -> Result<(), NotificationError> {
        let record = serde_json::to_string(&reminder)?;
        self.store.set(&Self::key(&reminder.id), record).await?;
        debug!(id = %reminder.id, end = %reminder.end, "reminder enabled");
        // Send fails only when nobody subscribes, which is fine.
        let _ = self.changes.send(ReminderChange::Enabled { id: reminder.id });
        Ok(())
    }

    /// Disable a reminder; removing an unknown id is a no-op.
    pub async fn disable(&self, id: &str) -> Result<(), NotificationError> {
        self.store.delete(&Self::key(id)).await?;
        debug!(id, "reminder disabled");
        let _ = self.changes.send(ReminderChange::Disabled { id: id.to_string() });
        Ok(())
    }

    /// Whether a record exists for this event id.
    pub async fn is_enabled(&self, id: &str) -> Result<bool, NotificationError> {
        Ok(self.store.get(&Self::key(id)).await?.is_some())
    }

    /// All currently enabled reminders. Records that fail to parse are
    /// skipped silently (debug-logged).
    pub async fn enabled_reminders(&self) -> Result<Vec<Reminder>, NotificationError> {
        let entries = self.store.list_by_prefix(KEY_PREFIX).await?;
        let mut reminders = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            match serde_json::from_str::<Reminder>(&value) {
                Ok(reminder) => reminders.push(reminder),
                Err(error) => {
                    debug!(key = %key, %error, "skipping malformed reminder record");
                }
            }
        }
        Ok(reminders)
    }
}
