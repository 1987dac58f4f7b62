#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::domain::{
    BerthId, CargoManifest, NotificationId, NotificationSnapshot, NotificationStatus, OfficerId,
    VesselReference, VisitNotification,
};
use crate::ports::StoredNotification;
use crate::{PortCallError, Result};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub(crate) struct NotificationRow {
    pub(crate) id: String,
    pub(crate) referred_vessel: String,
    pub(crate) arrival_date: Option<DateTime<Utc>>,
    pub(crate) departure_date: Option<DateTime<Utc>>,
    pub(crate) status: String,
    pub(crate) rejection_reason: Option<String>,
    pub(crate) assigned_berth_id: Option<String>,
    pub(crate) decided_by: Option<String>,
    pub(crate) is_hazardous: bool,
    pub(crate) loading_manifest: Option<serde_json::Value>,
    pub(crate) unloading_manifest: Option<serde_json::Value>,
    pub(crate) version: i64,
}

/// Column values for an insert or update, in bind order.
pub(crate) struct NotificationColumns {
    pub(crate) id: String,
    pub(crate) referred_vessel: String,
    pub(crate) arrival_date: Option<DateTime<Utc>>,
    pub(crate) departure_date: Option<DateTime<Utc>>,
    pub(crate) status: &'static str,
    pub(crate) rejection_reason: Option<String>,
    pub(crate) assigned_berth_id: Option<String>,
    pub(crate) decided_by: Option<String>,
    pub(crate) is_hazardous: bool,
    pub(crate) loading_manifest: Option<serde_json::Value>,
    pub(crate) unloading_manifest: Option<serde_json::Value>,
}

pub(crate) fn columns_from_notification(
    notification: &VisitNotification,
) -> Result<NotificationColumns> {
    let snapshot = notification.snapshot();
    Ok(NotificationColumns {
        id: snapshot.id.value().to_string(),
        referred_vessel: snapshot.referred_vessel.value().to_string(),
        arrival_date: snapshot.arrival_date,
        departure_date: snapshot.departure_date,
        status: snapshot.status.as_str(),
        rejection_reason: snapshot.rejection_reason,
        assigned_berth_id: snapshot.assigned_berth_id.map(|id| id.value().to_string()),
        decided_by: snapshot.decided_by.map(|id| id.value().to_string()),
        is_hazardous: snapshot.is_hazardous,
        loading_manifest: manifest_to_json(snapshot.loading_manifest.as_ref())?,
        unloading_manifest: manifest_to_json(snapshot.unloading_manifest.as_ref())?,
    })
}

pub(crate) fn parse_notification_row(row: NotificationRow) -> Result<StoredNotification> {
    let status = NotificationStatus::try_from(row.status.as_str()).map_err(|e| {
        PortCallError::DatabaseError(format!("Notification {}: {e}", row.id))
    })?;
    let snapshot = NotificationSnapshot {
        id: NotificationId::new(row.id),
        referred_vessel: VesselReference::new(row.referred_vessel),
        arrival_date: row.arrival_date,
        departure_date: row.departure_date,
        status,
        rejection_reason: row.rejection_reason,
        assigned_berth_id: row.assigned_berth_id.map(BerthId::new),
        decided_by: row.decided_by.map(OfficerId::new),
        is_hazardous: row.is_hazardous,
        loading_manifest: manifest_from_json(row.loading_manifest)?,
        unloading_manifest: manifest_from_json(row.unloading_manifest)?,
    };
    let notification = VisitNotification::restore(snapshot)
        .map_err(|e| PortCallError::DatabaseError(e.to_string()))?;

    Ok(StoredNotification {
        notification,
        version: row.version,
    })
}

fn manifest_to_json(manifest: Option<&CargoManifest>) -> Result<Option<serde_json::Value>> {
    manifest
        .map(serde_json::to_value)
        .transpose()
        .map_err(PortCallError::from)
}

fn manifest_from_json(value: Option<serde_json::Value>) -> Result<Option<CargoManifest>> {
    value
        .map(serde_json::from_value)
        .transpose()
        .map_err(PortCallError::from)
}
