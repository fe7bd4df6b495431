//! Reminder Scheduler
//!
//! Keeps exactly one armed timer per enabled reminder. Scheduling is
//! deliberately not incremental: every registry change aborts all armed
//! timers and recreates them from the persisted records, the same
//! clear-everything-then-rearm approach the dashboard has always used to
//! guarantee a reload can never double-fire a reminder.
//!
//! Past-due reminders are skipped at arm time; a reminder whose event
//! already ended fires nothing.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::registry::{NotificationError, NotificationRegistry, Reminder};

/// Delivery target for fired reminders
///
/// The browser Notification API, a desktop toast or a test channel; the
/// scheduler does not care.
#[async_trait]
pub trait ReminderSink: Send + Sync {
    async fn deliver(&self, reminder: &Reminder);
}

/// One timer per enabled reminder, rebuilt on every registry change
pub struct ReminderScheduler {
    registry: Arc<NotificationRegistry>,
    sink: Arc<dyn ReminderSink>,
    timers: Mutex<HashMap<String, JoinHandle<()>>>,
}

impl ReminderScheduler {
    pub fn new(registry: Arc<NotificationRegistry>, sink: Arc<dyn ReminderSink>) -> Self {
        ReminderScheduler {
            registry,
            sink,
            timers: Mutex::new(HashMap::new()),
        }
    }

    /// Abort every armed timer and recreate them from the registry.
    pub async fn reschedule_all(&self) -> Result<(), NotificationError> {
        let mut timers = self.timers.lock().await;
        for (_, timer) in timers.drain() {
            timer.abort();
        }

        for reminder in self.registry.enabled_reminders().await? {
            let Ok(delay) = (reminder.end - Utc::now()).to_std() else {
                debug!(id = %reminder.id, end = %reminder.end, "reminder past due, not arming");
                continue;
            };

            let sink = Arc::clone(&self.sink);
            let id = reminder.id.clone();
            let handle = tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                info!(id = %reminder.id, title = %reminder.title, "🔔 reminder due");
                sink.deliver(&reminder).await;
            });
            timers.insert(id, handle);
        }

        debug!(armed = timers.len(), "reminder timers rebuilt");
        Ok(())
    }

    /// Number of currently armed timers.
    pub async fn armed_timers(&self) -> usize {
        self.timers.lock().await.len()
    }

    /// Arm the timers and keep them in sync with the registry until the
    /// registry is dropped. Meant to be spawned once per session.
    pub async fn run(self: Arc<Self>) {
        // Subscribe before the initial arm so a change racing the startup
        // is never missed.
        let mut feed = self.registry.subscribe();

        if let Err(error) = self.reschedule_all().await {
            warn!(%error, "initial reminder scheduling failed");
        }

        loop {
            match feed.recv().await {
                Ok(change) => {
                    debug!(?change, "reminder registry changed");
                    if let Err(error) = self.reschedule_all().await {
                        warn!(%error, "rescheduling reminders failed");
                    }
                }
                Err(RecvError::Lagged(missed)) => {
                    debug!(missed, "reminder feed lagged, rescheduling");
                    if let Err(error) = self.reschedule_all().await {
                        warn!(%error, "rescheduling reminders failed");
                    }
                }
                Err(RecvError::Closed) => break,
            }
        }
    }
}
