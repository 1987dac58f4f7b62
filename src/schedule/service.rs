#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use super::engine::compute;
use super::model::{DailyScheduleResult, DayPlanInput, ScheduledCall, VesselLookup};
use crate::domain::VesselReference;
use crate::gateway::{ApprovedNotification, Berth};
use crate::ports::{Credential, PortDataGateway};
use crate::{PortCallError, Result};
use chrono::NaiveDate;
use futures_util::stream::{self, StreamExt};
use itertools::Itertools;
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleSettings {
    pub vessel_lookup_timeout: Duration,
    pub vessel_lookup_concurrency: usize,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            vessel_lookup_timeout: Duration::from_millis(5_000),
            vessel_lookup_concurrency: 8,
        }
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
///
/// # Errors
/// Returns [`PortCallError::ValidationFailed`] for anything else.
pub fn parse_schedule_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| {
        PortCallError::ValidationFailed(format!("Invalid date '{raw}', expected YYYY-MM-DD: {e}"))
    })
}

pub struct DailyScheduleService<G> {
    gateway: G,
    settings: ScheduleSettings,
}

impl<G> DailyScheduleService<G>
where
    G: PortDataGateway + Sync,
{
    #[must_use]
    pub const fn new(gateway: G, settings: ScheduleSettings) -> Self {
        Self { gateway, settings }
    }

    /// Build the feasibility report for `date`.
    ///
    /// # Errors
    /// Fails only for a missing or refused credential, an invalid date, or
    /// when the day's notifications or berth catalog cannot be fetched.
    pub async fn generate(&self, date: &str, credential: &Credential) -> Result<DailyScheduleResult> {
        credential.bearer()?;
        let date = parse_schedule_date(date)?;

        let input = self.fetch(date, credential).await?;
        let report = compute(input.date, &input.calls, &input.berths);

        info!(
            %date,
            feasible = report.is_feasible,
            assignments = report.assignment_count(),
            warnings = report.warnings.len(),
            "daily schedule generated"
        );
        Ok(report)
    }

    /// Fetch the day's approved notifications, berths and vessel details.
    ///
    /// # Errors
    /// Returns [`PortCallError::Unauthorized`] whenever the store refuses the
    /// credential, and gateway errors for the notification and berth lists.
    /// Individual berth and vessel lookups degrade instead of failing.
    pub async fn fetch(&self, date: NaiveDate, credential: &Credential) -> Result<DayPlanInput> {
        credential.bearer()?;

        let notifications = self.gateway.approved_notifications(date, credential).await?;
        let mut berths = self.gateway.berths(credential).await?;
        if !berths.is_empty() {
            self.complete_berth_catalog(&notifications, &mut berths, credential)
                .await?;
        }

        let references = notifications
            .iter()
            .map(|notification| notification.referred_vessel.clone())
            .unique()
            .collect::<Vec<_>>();
        let vessels = self.lookup_vessels(references, credential).await?;

        let calls = notifications
            .into_iter()
            .map(|notification| {
                let vessel = vessels
                    .get(&notification.referred_vessel)
                    .cloned()
                    .unwrap_or(VesselLookup::NotFound);
                ScheduledCall::new(notification, vessel)
            })
            .collect();

        Ok(DayPlanInput {
            date,
            calls,
            berths,
        })
    }

    /// Fetch berths that are assigned but missing from the catalog listing.
    async fn complete_berth_catalog(
        &self,
        notifications: &[ApprovedNotification],
        berths: &mut Vec<Berth>,
        credential: &Credential,
    ) -> Result<()> {
        let known = berths
            .iter()
            .map(|berth| berth.id.clone())
            .collect::<HashSet<_>>();
        let missing = notifications
            .iter()
            .filter_map(|notification| notification.assigned_berth_id.as_ref())
            .filter(|berth_id| !known.contains(*berth_id))
            .unique()
            .sorted()
            .cloned()
            .collect::<Vec<_>>();

        for berth_id in missing {
            match self.gateway.berth(&berth_id, credential).await {
                Ok(Some(berth)) => berths.push(berth),
                Ok(None) => warn!(%berth_id, "assigned berth not found"),
                Err(PortCallError::Unauthorized(message)) => {
                    return Err(PortCallError::Unauthorized(message))
                }
                Err(error) => warn!(%berth_id, %error, "berth lookup failed"),
            }
        }
        Ok(())
    }

    async fn lookup_vessels(
        &self,
        references: Vec<VesselReference>,
        credential: &Credential,
    ) -> Result<HashMap<VesselReference, VesselLookup>> {
        let concurrency = self.settings.vessel_lookup_concurrency.max(1);
        let results = stream::iter(references)
            .map(|reference| async move {
                let lookup = self.lookup_vessel(&reference, credential).await;
                (reference, lookup)
            })
            .buffer_unordered(concurrency)
            .collect::<Vec<_>>()
            .await;

        results
            .into_iter()
            .map(|(reference, lookup)| lookup.map(|lookup| (reference, lookup)))
            .collect()
    }

    async fn lookup_vessel(
        &self,
        reference: &VesselReference,
        credential: &Credential,
    ) -> Result<VesselLookup> {
        let lookup = tokio::time::timeout(
            self.settings.vessel_lookup_timeout,
            self.gateway.vessel_by_reference(reference, credential),
        )
        .await;

        match lookup {
            Err(_) => {
                warn!(%reference, "vessel lookup timed out");
                Ok(VesselLookup::TimedOut)
            }
            Ok(Ok(Some(vessel))) => Ok(VesselLookup::Found(vessel)),
            Ok(Ok(None)) => Ok(VesselLookup::NotFound),
            Ok(Err(PortCallError::Unauthorized(message))) => {
                Err(PortCallError::Unauthorized(message))
            }
            Ok(Err(error)) => {
                warn!(%reference, %error, "vessel lookup failed");
                Ok(VesselLookup::Failed(error.to_string()))
            }
        }
    }
}
