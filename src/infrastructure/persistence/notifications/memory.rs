#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::domain::{NotificationId, VisitNotification};
use crate::ports::{NotificationStore, PortFuture, StoredNotification};
use crate::PortCallError;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Process-local store with the same version semantics as the database.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationStore {
    rows: Arc<Mutex<HashMap<NotificationId, StoredNotification>>>,
}

impl InMemoryNotificationStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.lock().await.is_empty()
    }
}

fn stale(id: &NotificationId, expected_version: i64, current: i64) -> PortCallError {
    PortCallError::Conflict(format!(
        "Notification {id} was modified since version {expected_version} (now {current})"
    ))
}

fn missing(id: &NotificationId) -> PortCallError {
    PortCallError::NotFound(format!("Notification {id} not found"))
}

impl NotificationStore for InMemoryNotificationStore {
    fn load<'a>(&'a self, id: &'a NotificationId) -> PortFuture<'a, Option<StoredNotification>> {
        Box::pin(async move { Ok(self.rows.lock().await.get(id).cloned()) })
    }

    fn insert<'a>(
        &'a self,
        notification: &'a VisitNotification,
    ) -> PortFuture<'a, StoredNotification> {
        Box::pin(async move {
            let mut rows = self.rows.lock().await;
            if rows.contains_key(notification.id()) {
                return Err(PortCallError::Conflict(format!(
                    "Notification {} already exists",
                    notification.id()
                )));
            }
            let stored = StoredNotification {
                notification: notification.clone(),
                version: 1,
            };
            rows.insert(notification.id().clone(), stored.clone());
            Ok(stored)
        })
    }

    fn save<'a>(
        &'a self,
        notification: &'a VisitNotification,
        expected_version: i64,
    ) -> PortFuture<'a, StoredNotification> {
        Box::pin(async move {
            let mut rows = self.rows.lock().await;
            let id = notification.id();
            let current = rows.get_mut(id).ok_or_else(|| missing(id))?;
            if current.version != expected_version {
                return Err(stale(id, expected_version, current.version));
            }
            current.notification = notification.clone();
            current.version += 1;
            Ok(current.clone())
        })
    }

    fn delete<'a>(&'a self, id: &'a NotificationId, expected_version: i64) -> PortFuture<'a, ()> {
        Box::pin(async move {
            let mut rows = self.rows.lock().await;
            let current = rows.get(id).ok_or_else(|| missing(id))?.version;
            if current != expected_version {
                return Err(stale(id, expected_version, current));
            }
            rows.remove(id);
            Ok(())
        })
    }
}
