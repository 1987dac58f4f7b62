#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use super::transition::{next_state, LifecycleEvent};
use super::{CargoManifest, ManifestDirection, NotificationState, NotificationStatus};
use crate::domain::shared::{
    BerthId, LifecycleError, NotificationId, OfficerId, Result, VesselReference,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted shape of a notification, used to rebuild the aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSnapshot {
    pub id: NotificationId,
    pub referred_vessel: VesselReference,
    pub arrival_date: Option<DateTime<Utc>>,
    pub departure_date: Option<DateTime<Utc>>,
    pub status: NotificationStatus,
    pub rejection_reason: Option<String>,
    pub assigned_berth_id: Option<BerthId>,
    pub decided_by: Option<OfficerId>,
    pub is_hazardous: bool,
    pub loading_manifest: Option<CargoManifest>,
    pub unloading_manifest: Option<CargoManifest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitNotification {
    id: NotificationId,
    referred_vessel: VesselReference,
    arrival_date: Option<DateTime<Utc>>,
    departure_date: Option<DateTime<Utc>>,
    state: NotificationState,
    is_hazardous: bool,
    loading_manifest: Option<CargoManifest>,
    unloading_manifest: Option<CargoManifest>,
}

impl VisitNotification {
    #[must_use]
    pub const fn new_draft(
        id: NotificationId,
        referred_vessel: VesselReference,
        is_hazardous: bool,
    ) -> Self {
        Self {
            id,
            referred_vessel,
            arrival_date: None,
            departure_date: None,
            state: NotificationState::InProgress,
            is_hazardous,
            loading_manifest: None,
            unloading_manifest: None,
        }
    }

    /// Rebuild a notification from stored fields.
    ///
    /// # Errors
    /// Returns [`LifecycleError::ValidationFailed`] when the stored fields
    /// describe a state the lifecycle can never produce.
    pub fn restore(snapshot: NotificationSnapshot) -> Result<Self> {
        let state = state_from_snapshot(&snapshot)?;
        if let Some(manifest) = &snapshot.loading_manifest {
            ensure_direction(ManifestDirection::Load, manifest)?;
        }
        if let Some(manifest) = &snapshot.unloading_manifest {
            ensure_direction(ManifestDirection::Unload, manifest)?;
        }

        Ok(Self {
            id: snapshot.id,
            referred_vessel: snapshot.referred_vessel,
            arrival_date: snapshot.arrival_date,
            departure_date: snapshot.departure_date,
            state,
            is_hazardous: snapshot.is_hazardous,
            loading_manifest: snapshot.loading_manifest,
            unloading_manifest: snapshot.unloading_manifest,
        })
    }

    #[must_use]
    pub fn snapshot(&self) -> NotificationSnapshot {
        NotificationSnapshot {
            id: self.id.clone(),
            referred_vessel: self.referred_vessel.clone(),
            arrival_date: self.arrival_date,
            departure_date: self.departure_date,
            status: self.status(),
            rejection_reason: self.rejection_reason().map(str::to_string),
            assigned_berth_id: self.assigned_berth_id().cloned(),
            decided_by: self.state.decided_by().cloned(),
            is_hazardous: self.is_hazardous,
            loading_manifest: self.loading_manifest.clone(),
            unloading_manifest: self.unloading_manifest.clone(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> &NotificationId {
        &self.id
    }

    #[must_use]
    pub const fn referred_vessel(&self) -> &VesselReference {
        &self.referred_vessel
    }

    #[must_use]
    pub const fn arrival_date(&self) -> Option<DateTime<Utc>> {
        self.arrival_date
    }

    #[must_use]
    pub const fn departure_date(&self) -> Option<DateTime<Utc>> {
        self.departure_date
    }

    #[must_use]
    pub const fn state(&self) -> &NotificationState {
        &self.state
    }

    #[must_use]
    pub const fn status(&self) -> NotificationStatus {
        self.state.status()
    }

    #[must_use]
    pub fn rejection_reason(&self) -> Option<&str> {
        self.state.rejection_reason()
    }

    #[must_use]
    pub const fn assigned_berth_id(&self) -> Option<&BerthId> {
        self.state.assigned_berth()
    }

    #[must_use]
    pub const fn is_hazardous(&self) -> bool {
        self.is_hazardous
    }

    #[must_use]
    pub const fn loading_manifest(&self) -> Option<&CargoManifest> {
        self.loading_manifest.as_ref()
    }

    #[must_use]
    pub const fn unloading_manifest(&self) -> Option<&CargoManifest> {
        self.unloading_manifest.as_ref()
    }

    #[must_use]
    pub const fn manifest(&self, direction: ManifestDirection) -> Option<&CargoManifest> {
        match direction {
            ManifestDirection::Load => self.loading_manifest.as_ref(),
            ManifestDirection::Unload => self.unloading_manifest.as_ref(),
        }
    }

    /// # Errors
    /// Returns [`LifecycleError::PreconditionFailed`] unless the notification is a draft.
    pub fn update_dates(
        &mut self,
        arrival: Option<DateTime<Utc>>,
        departure: Option<DateTime<Utc>>,
    ) -> Result<()> {
        self.ensure_editable("update dates")?;
        self.arrival_date = arrival;
        self.departure_date = departure;
        Ok(())
    }

    /// Put `manifest` into the `slot` direction, replacing any previous one.
    ///
    /// # Errors
    /// Returns [`LifecycleError::PreconditionFailed`] unless the notification is a
    /// draft, and [`LifecycleError::ValidationFailed`] when the manifest is tagged
    /// with the other direction.
    pub fn set_manifest(&mut self, slot: ManifestDirection, manifest: CargoManifest) -> Result<()> {
        self.ensure_editable("set a cargo manifest")?;
        ensure_direction(slot, &manifest)?;
        *self.manifest_slot(slot) = Some(manifest);
        Ok(())
    }

    /// # Errors
    /// See [`Self::set_manifest`].
    pub fn set_loading_manifest(&mut self, manifest: CargoManifest) -> Result<()> {
        self.set_manifest(ManifestDirection::Load, manifest)
    }

    /// # Errors
    /// See [`Self::set_manifest`].
    pub fn set_unloading_manifest(&mut self, manifest: CargoManifest) -> Result<()> {
        self.set_manifest(ManifestDirection::Unload, manifest)
    }

    /// # Errors
    /// Returns [`LifecycleError::PreconditionFailed`] unless the notification is a draft.
    pub fn remove_manifest(&mut self, direction: ManifestDirection) -> Result<Option<CargoManifest>> {
        self.ensure_editable("remove a cargo manifest")?;
        Ok(self.manifest_slot(direction).take())
    }

    /// # Errors
    /// Returns [`LifecycleError::PreconditionFailed`] unless the notification is a
    /// draft, and [`LifecycleError::ValidationFailed`] when the call window is
    /// incomplete or not strictly increasing.
    pub fn submit(&mut self) -> Result<()> {
        let state = next_state(&self.state, LifecycleEvent::Submit)?;
        self.ensure_valid_window()?;
        self.state = state;
        Ok(())
    }

    /// # Errors
    /// Returns [`LifecycleError::PreconditionFailed`] unless the notification is submitted.
    pub fn accept(&mut self) -> Result<()> {
        self.state = next_state(&self.state, LifecycleEvent::Accept)?;
        Ok(())
    }

    /// Accept the notification and assign it to `berth_id`.
    ///
    /// # Errors
    /// Returns [`LifecycleError::ValidationFailed`] for a blank berth or officer
    /// and when the notification is not submitted.
    pub fn approve(&mut self, berth_id: BerthId, officer_id: OfficerId) -> Result<()> {
        self.state = next_state(
            &self.state,
            LifecycleEvent::Approve {
                berth_id,
                officer_id,
            },
        )?;
        Ok(())
    }

    /// # Errors
    /// Returns [`LifecycleError::ValidationFailed`] for a blank reason or officer
    /// and when the notification is not submitted.
    pub fn reject(&mut self, reason: &str, officer_id: OfficerId) -> Result<()> {
        self.state = next_state(
            &self.state,
            LifecycleEvent::Reject {
                reason: reason.trim().to_string(),
                officer_id,
            },
        )?;
        Ok(())
    }

    /// # Errors
    /// Returns [`LifecycleError::ValidationFailed`] unless the notification is
    /// rejected or in progress with a valid call window.
    pub fn resubmit(&mut self) -> Result<()> {
        let state = next_state(&self.state, LifecycleEvent::Resubmit)?;
        self.ensure_valid_window()?;
        self.state = state;
        Ok(())
    }

    /// # Errors
    /// Returns [`LifecycleError::ValidationFailed`] unless the notification is rejected.
    pub fn convert_to_draft(&mut self) -> Result<()> {
        self.state = next_state(&self.state, LifecycleEvent::ConvertToDraft)?;
        Ok(())
    }

    /// Replace the call window of a rejected notification and reopen it as a
    /// draft. The notification is not submitted again; callers follow up with
    /// [`Self::submit`].
    ///
    /// # Errors
    /// Returns [`LifecycleError::ValidationFailed`] unless the notification is rejected.
    pub fn update_and_resubmit(
        &mut self,
        arrival: Option<DateTime<Utc>>,
        departure: Option<DateTime<Utc>>,
    ) -> Result<()> {
        self.state = next_state(&self.state, LifecycleEvent::UpdateAndResubmit)?;
        self.arrival_date = arrival;
        self.departure_date = departure;
        Ok(())
    }

    /// Replace whichever manifests are provided, leaving the other slot as is.
    ///
    /// # Errors
    /// Same guards as [`Self::set_manifest`]; both manifests are checked before
    /// either is written.
    pub fn replace_manifests_for_resubmit(
        &mut self,
        loading: Option<CargoManifest>,
        unloading: Option<CargoManifest>,
    ) -> Result<()> {
        self.ensure_editable("replace cargo manifests")?;
        if let Some(manifest) = &loading {
            ensure_direction(ManifestDirection::Load, manifest)?;
        }
        if let Some(manifest) = &unloading {
            ensure_direction(ManifestDirection::Unload, manifest)?;
        }

        if loading.is_some() {
            self.loading_manifest = loading;
        }
        if unloading.is_some() {
            self.unloading_manifest = unloading;
        }
        Ok(())
    }

    /// # Errors
    /// Returns [`LifecycleError::PreconditionFailed`] unless the notification is a draft.
    pub fn ensure_deletable(&self) -> Result<()> {
        self.ensure_editable("be deleted")
    }

    fn ensure_editable(&self, action: &str) -> Result<()> {
        if self.status().is_editable() {
            return Ok(());
        }
        Err(LifecycleError::PreconditionFailed(format!(
            "Notification {} must be in progress to {action} (current status: {})",
            self.id,
            self.status()
        )))
    }

    fn ensure_valid_window(&self) -> Result<()> {
        match (self.arrival_date, self.departure_date) {
            (Some(arrival), Some(departure)) if arrival < departure => Ok(()),
            (Some(_), Some(_)) => Err(LifecycleError::ValidationFailed(
                "Arrival date must be before departure date".to_string(),
            )),
            _ => Err(LifecycleError::ValidationFailed(
                "Arrival and departure dates are required before submission".to_string(),
            )),
        }
    }

    fn manifest_slot(&mut self, direction: ManifestDirection) -> &mut Option<CargoManifest> {
        match direction {
            ManifestDirection::Load => &mut self.loading_manifest,
            ManifestDirection::Unload => &mut self.unloading_manifest,
        }
    }
}

fn ensure_direction(slot: ManifestDirection, manifest: &CargoManifest) -> Result<()> {
    if manifest.direction() == slot {
        return Ok(());
    }
    Err(LifecycleError::ValidationFailed(format!(
        "Manifest tagged {} cannot be used as the {slot} manifest",
        manifest.direction()
    )))
}

fn state_from_snapshot(snapshot: &NotificationSnapshot) -> Result<NotificationState> {
    let invalid = |detail: &str| {
        Err(LifecycleError::ValidationFailed(format!(
            "Stored notification {} is inconsistent: {detail}",
            snapshot.id
        )))
    };

    match snapshot.status {
        NotificationStatus::InProgress | NotificationStatus::Submitted => {
            if snapshot.rejection_reason.is_some() {
                return invalid("only rejected notifications carry a rejection reason");
            }
            if snapshot.assigned_berth_id.is_some() {
                return invalid("only accepted notifications carry a berth");
            }
            if snapshot.decided_by.is_some() {
                return invalid("undecided notifications cannot name a deciding officer");
            }
            Ok(if snapshot.status == NotificationStatus::InProgress {
                NotificationState::InProgress
            } else {
                NotificationState::Submitted
            })
        }
        NotificationStatus::Accepted => {
            if snapshot.rejection_reason.is_some() {
                return invalid("only rejected notifications carry a rejection reason");
            }
            Ok(NotificationState::Accepted {
                assigned_berth: snapshot.assigned_berth_id.clone(),
                approved_by: snapshot.decided_by.clone(),
            })
        }
        NotificationStatus::Rejected => {
            if snapshot.assigned_berth_id.is_some() {
                return invalid("only accepted notifications carry a berth");
            }
            match (&snapshot.rejection_reason, &snapshot.decided_by) {
                (Some(reason), Some(officer)) if !reason.trim().is_empty() => {
                    Ok(NotificationState::Rejected {
                        reason: reason.clone(),
                        rejected_by: officer.clone(),
                    })
                }
                _ => invalid("rejected notifications need a reason and an officer"),
            }
        }
    }
}
