#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::domain::{
    BerthId, CargoManifest, LifecycleError, ManifestDirection, NotificationId, OfficerId,
    VesselReference, VisitNotification,
};
use crate::ports::{NotificationStore, StoredNotification};
use crate::{PortCallError, Result};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

/// Runs one lifecycle operation per call against the notification store.
///
/// Every mutation loads the notification, applies the operation to the
/// aggregate and saves it back under the version it was loaded with.
pub struct NotificationLifecycleService<S> {
    store: S,
}

impl<S> NotificationLifecycleService<S>
where
    S: NotificationStore + Sync,
{
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// # Errors
    /// Returns store failures.
    pub async fn create_draft(
        &self,
        referred_vessel: VesselReference,
        is_hazardous: bool,
    ) -> Result<StoredNotification> {
        if referred_vessel.value().trim().is_empty() {
            return Err(PortCallError::ValidationFailed(
                "A vessel reference is required".to_string(),
            ));
        }
        let draft =
            VisitNotification::new_draft(NotificationId::generate(), referred_vessel, is_hazardous);
        let stored = self.store.insert(&draft).await?;
        info!(id = %stored.notification.id(), "notification draft created");
        Ok(stored)
    }

    /// # Errors
    /// Returns [`PortCallError::NotFound`] for an unknown id.
    pub async fn get(&self, id: &NotificationId) -> Result<StoredNotification> {
        self.store
            .load(id)
            .await?
            .ok_or_else(|| PortCallError::NotFound(format!("Notification {id} not found")))
    }

    /// # Errors
    /// See [`VisitNotification::update_dates`].
    pub async fn update_dates(
        &self,
        id: &NotificationId,
        arrival: Option<DateTime<Utc>>,
        departure: Option<DateTime<Utc>>,
    ) -> Result<StoredNotification> {
        self.apply(id, "update_dates", |n| n.update_dates(arrival, departure))
            .await
            .map(|(stored, ())| stored)
    }

    /// # Errors
    /// See [`VisitNotification::set_manifest`].
    pub async fn set_manifest(
        &self,
        id: &NotificationId,
        slot: ManifestDirection,
        manifest: CargoManifest,
    ) -> Result<StoredNotification> {
        self.apply(id, "set_manifest", |n| n.set_manifest(slot, manifest))
            .await
            .map(|(stored, ())| stored)
    }

    /// Returns the stored notification and the manifest that was removed.
    ///
    /// # Errors
    /// See [`VisitNotification::remove_manifest`].
    pub async fn remove_manifest(
        &self,
        id: &NotificationId,
        direction: ManifestDirection,
    ) -> Result<(StoredNotification, Option<CargoManifest>)> {
        self.apply(id, "remove_manifest", |n| n.remove_manifest(direction))
            .await
    }

    /// # Errors
    /// See [`VisitNotification::submit`].
    pub async fn submit(&self, id: &NotificationId) -> Result<StoredNotification> {
        self.apply(id, "submit", VisitNotification::submit)
            .await
            .map(|(stored, ())| stored)
    }

    /// # Errors
    /// See [`VisitNotification::accept`].
    pub async fn accept(&self, id: &NotificationId) -> Result<StoredNotification> {
        self.apply(id, "accept", VisitNotification::accept)
            .await
            .map(|(stored, ())| stored)
    }

    /// # Errors
    /// See [`VisitNotification::approve`].
    pub async fn approve(
        &self,
        id: &NotificationId,
        berth_id: BerthId,
        officer_id: OfficerId,
    ) -> Result<StoredNotification> {
        self.apply(id, "approve", |n| n.approve(berth_id, officer_id))
            .await
            .map(|(stored, ())| stored)
    }

    /// # Errors
    /// See [`VisitNotification::reject`].
    pub async fn reject(
        &self,
        id: &NotificationId,
        reason: &str,
        officer_id: OfficerId,
    ) -> Result<StoredNotification> {
        self.apply(id, "reject", |n| n.reject(reason, officer_id))
            .await
            .map(|(stored, ())| stored)
    }

    /// # Errors
    /// See [`VisitNotification::resubmit`].
    pub async fn resubmit(&self, id: &NotificationId) -> Result<StoredNotification> {
        self.apply(id, "resubmit", VisitNotification::resubmit)
            .await
            .map(|(stored, ())| stored)
    }

    /// # Errors
    /// See [`VisitNotification::convert_to_draft`].
    pub async fn convert_to_draft(&self, id: &NotificationId) -> Result<StoredNotification> {
        self.apply(id, "convert_to_draft", VisitNotification::convert_to_draft)
            .await
            .map(|(stored, ())| stored)
    }

    /// # Errors
    /// See [`VisitNotification::update_and_resubmit`].
    pub async fn update_and_resubmit(
        &self,
        id: &NotificationId,
        arrival: Option<DateTime<Utc>>,
        departure: Option<DateTime<Utc>>,
    ) -> Result<StoredNotification> {
        self.apply(id, "update_and_resubmit", |n| {
            n.update_and_resubmit(arrival, departure)
        })
        .await
        .map(|(stored, ())| stored)
    }

    /// # Errors
    /// See [`VisitNotification::replace_manifests_for_resubmit`].
    pub async fn replace_manifests_for_resubmit(
        &self,
        id: &NotificationId,
        loading: Option<CargoManifest>,
        unloading: Option<CargoManifest>,
    ) -> Result<StoredNotification> {
        self.apply(id, "replace_manifests_for_resubmit", |n| {
            n.replace_manifests_for_resubmit(loading, unloading)
        })
        .await
        .map(|(stored, ())| stored)
    }

    /// Delete a draft.
    ///
    /// # Errors
    /// Returns [`PortCallError::NotFound`], [`PortCallError::PreconditionFailed`]
    /// for anything but a draft, and [`PortCallError::Conflict`] when the
    /// notification changed since it was loaded.
    pub async fn delete(&self, id: &NotificationId) -> Result<()> {
        let stored = self.get(id).await?;
        if let Err(error) = stored.notification.ensure_deletable() {
            warn!(%id, %error, "notification delete refused");
            return Err(error.into());
        }
        self.store.delete(id, stored.version).await?;
        info!(%id, "notification deleted");
        Ok(())
    }

    async fn apply<T, F>(
        &self,
        id: &NotificationId,
        action: &'static str,
        operation: F,
    ) -> Result<(StoredNotification, T)>
    where
        F: FnOnce(&mut VisitNotification) -> std::result::Result<T, LifecycleError>,
    {
        let StoredNotification {
            mut notification,
            version,
        } = self.get(id).await?;

        let outcome = match operation(&mut notification) {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!(%id, action, %error, "notification operation refused");
                return Err(error.into());
            }
        };

        let stored = self.store.save(&notification, version).await?;
        info!(
            %id,
            action,
            status = %stored.notification.status(),
            version = stored.version,
            "notification updated"
        );
        Ok((stored, outcome))
    }
}
