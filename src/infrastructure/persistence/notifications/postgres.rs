#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use super::mapper::{columns_from_notification, parse_notification_row, NotificationRow};
use crate::domain::{NotificationId, VisitNotification};
use crate::ports::{NotificationStore, PortFuture, StoredNotification};
use crate::{PortCallError, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use tracing::debug;

pub const SCHEMA_SQL: &str = include_str!("../../../../sql/schema.sql");

const SELECT_COLUMNS: &str = "SELECT id, referred_vessel, arrival_date, departure_date, status,
        rejection_reason, assigned_berth_id, decided_by, is_hazardous,
        loading_manifest, unloading_manifest, version
     FROM visit_notifications";

#[derive(Clone)]
pub struct PgNotificationStore {
    pool: PgPool,
}

impl PgNotificationStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// # Errors
    /// Returns [`PortCallError::DatabaseError`] when the connection cannot be established.
    pub async fn connect(connection_string: &str, timeout_ms: Option<u64>) -> Result<Self> {
        let connect_timeout = Duration::from_millis(timeout_ms.unwrap_or(3_000));
        PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(connect_timeout)
            .connect(connection_string)
            .await
            .map(Self::new)
            .map_err(|error| {
                PortCallError::DatabaseError(format!("Failed to connect to database: {error}"))
            })
    }

    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// # Errors
    /// Returns [`PortCallError::DatabaseError`] when the script fails.
    pub async fn initialize_schema_from_sql(&self, schema_sql: &str) -> Result<()> {
        sqlx::raw_sql(schema_sql)
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| PortCallError::DatabaseError(format!("Failed to initialize schema: {e}")))
    }

    async fn fetch(&self, id: &NotificationId) -> Result<Option<StoredNotification>> {
        let query = format!("{SELECT_COLUMNS} WHERE id = $1");
        sqlx::query_as::<_, NotificationRow>(&query)
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| PortCallError::DatabaseError(format!("Failed to load notification: {e}")))?
            .map(parse_notification_row)
            .transpose()
    }

    async fn create(&self, notification: &VisitNotification) -> Result<StoredNotification> {
        let columns = columns_from_notification(notification)?;
        let inserted = sqlx::query_scalar::<_, i64>(
            "INSERT INTO visit_notifications (
                 id, referred_vessel, arrival_date, departure_date, status,
                 rejection_reason, assigned_berth_id, decided_by, is_hazardous,
                 loading_manifest, unloading_manifest, version
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, 1)
             ON CONFLICT (id) DO NOTHING
             RETURNING version",
        )
        .bind(&columns.id)
        .bind(&columns.referred_vessel)
        .bind(columns.arrival_date)
        .bind(columns.departure_date)
        .bind(columns.status)
        .bind(&columns.rejection_reason)
        .bind(&columns.assigned_berth_id)
        .bind(&columns.decided_by)
        .bind(columns.is_hazardous)
        .bind(&columns.loading_manifest)
        .bind(&columns.unloading_manifest)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PortCallError::DatabaseError(format!("Failed to insert notification: {e}")))?;

        inserted
            .map(|version| StoredNotification {
                notification: notification.clone(),
                version,
            })
            .ok_or_else(|| {
                PortCallError::Conflict(format!("Notification {} already exists", columns.id))
            })
    }

    async fn update(
        &self,
        notification: &VisitNotification,
        expected_version: i64,
    ) -> Result<StoredNotification> {
        let columns = columns_from_notification(notification)?;
        let updated = sqlx::query_scalar::<_, i64>(
            "UPDATE visit_notifications
             SET arrival_date = $3, departure_date = $4, status = $5,
                 rejection_reason = $6, assigned_berth_id = $7, decided_by = $8,
                 is_hazardous = $9, loading_manifest = $10, unloading_manifest = $11,
                 version = version + 1, updated_at = NOW()
             WHERE id = $1 AND version = $2
             RETURNING version",
        )
        .bind(&columns.id)
        .bind(expected_version)
        .bind(columns.arrival_date)
        .bind(columns.departure_date)
        .bind(columns.status)
        .bind(&columns.rejection_reason)
        .bind(&columns.assigned_berth_id)
        .bind(&columns.decided_by)
        .bind(columns.is_hazardous)
        .bind(&columns.loading_manifest)
        .bind(&columns.unloading_manifest)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PortCallError::DatabaseError(format!("Failed to save notification: {e}")))?;

        match updated {
            Some(version) => {
                debug!(id = %notification.id(), version, "notification row updated");
                Ok(StoredNotification {
                    notification: notification.clone(),
                    version,
                })
            }
            None => Err(self.stale_write(notification.id(), expected_version).await),
        }
    }

    async fn remove(&self, id: &NotificationId, expected_version: i64) -> Result<()> {
        let removed = sqlx::query("DELETE FROM visit_notifications WHERE id = $1 AND version = $2")
            .bind(id.value())
            .bind(expected_version)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                PortCallError::DatabaseError(format!("Failed to delete notification: {e}"))
            })?;

        if removed.rows_affected() > 0 {
            Ok(())
        } else {
            Err(self.stale_write(id, expected_version).await)
        }
    }

    /// Explain a conditional write that matched no row.
    async fn stale_write(&self, id: &NotificationId, expected_version: i64) -> PortCallError {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM visit_notifications WHERE id = $1)",
        )
        .bind(id.value())
        .fetch_one(&self.pool)
        .await;

        match exists {
            Ok(true) => PortCallError::Conflict(format!(
                "Notification {id} was modified since version {expected_version}"
            )),
            Ok(false) => PortCallError::NotFound(format!("Notification {id} not found")),
            Err(e) => PortCallError::DatabaseError(format!("Failed to check notification: {e}")),
        }
    }
}

impl NotificationStore for PgNotificationStore {
    fn load<'a>(&'a self, id: &'a NotificationId) -> PortFuture<'a, Option<StoredNotification>> {
        Box::pin(self.fetch(id))
    }

    fn insert<'a>(
        &'a self,
        notification: &'a VisitNotification,
    ) -> PortFuture<'a, StoredNotification> {
        Box::pin(self.create(notification))
    }

    fn save<'a>(
        &'a self,
        notification: &'a VisitNotification,
        expected_version: i64,
    ) -> PortFuture<'a, StoredNotification> {
        Box::pin(self.update(notification, expected_version))
    }

    fn delete<'a>(&'a self, id: &'a NotificationId, expected_version: i64) -> PortFuture<'a, ()> {
        Box::pin(self.remove(id, expected_version))
    }
}
