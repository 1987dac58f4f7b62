#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use super::model::{
    BerthSchedule, DailyScheduleResult, DockAssignment, ScheduledCall, VesselLookup,
};
use crate::domain::BerthId;
use crate::gateway::Berth;
use chrono::NaiveDate;
use itertools::Itertools;
use std::cmp::Ordering;
use std::collections::HashMap;

pub const NO_DOCKS_WARNING: &str = "No docks available for assignment";

/// Working state of one `compute` call.
struct DayPlan<'a> {
    berth_names: HashMap<&'a BerthId, &'a str>,
    assignments: HashMap<BerthId, Vec<DockAssignment>>,
    warnings: Vec<String>,
    is_feasible: bool,
}

impl<'a> DayPlan<'a> {
    fn new(berths: &'a [Berth]) -> Self {
        Self {
            // A repeated id keeps its lowest name, whatever the listing order.
            berth_names: berths
                .iter()
                .sorted_by(|a, b| a.id.cmp(&b.id).then_with(|| a.name.cmp(&b.name)))
                .dedup_by(|a, b| a.id == b.id)
                .map(|berth| (&berth.id, berth.name.as_str()))
                .collect(),
            assignments: berths
                .iter()
                .map(|berth| (berth.id.clone(), Vec::new()))
                .collect(),
            warnings: Vec::new(),
            is_feasible: true,
        }
    }

    fn place(&mut self, call: &ScheduledCall) {
        let (vessel_id, vessel_name) = self.vessel_identity(call);
        if let Err(reason) = self.try_place(call, vessel_id, vessel_name) {
            self.is_feasible = false;
            self.warnings.push(format!(
                "Notification {} could not be scheduled: {reason}",
                call.notification.id
            ));
        }
    }

    fn vessel_identity(&mut self, call: &ScheduledCall) -> (Option<String>, String) {
        let reference = &call.notification.referred_vessel;
        match &call.vessel {
            VesselLookup::Found(vessel) => (Some(vessel.id.clone()), vessel.name.clone()),
            VesselLookup::NotFound | VesselLookup::TimedOut => {
                self.warnings
                    .push(format!("vessel details not found for {reference}"));
                (None, reference.value().to_string())
            }
            VesselLookup::Failed(detail) => {
                self.warnings
                    .push(format!("vessel lookup failed for {reference}: {detail}"));
                (None, reference.value().to_string())
            }
        }
    }

    fn try_place(
        &mut self,
        call: &ScheduledCall,
        vessel_id: Option<String>,
        vessel_name: String,
    ) -> Result<(), String> {
        let notification = &call.notification;
        let eta = notification
            .arrival_date
            .ok_or_else(|| "arrival date is missing".to_string())?;
        let etd = notification
            .departure_date
            .ok_or_else(|| "departure date is missing".to_string())?;
        if eta >= etd {
            return Err(format!("departure {etd} is not after arrival {eta}"));
        }
        let berth_id = notification
            .assigned_berth_id
            .clone()
            .ok_or_else(|| "no berth has been assigned".to_string())?;

        let berth_name = if let Some(name) = self.berth_names.get(&berth_id) {
            (*name).to_string()
        } else {
            self.warnings
                .push(format!("berth details not found for {berth_id}"));
            berth_id.value().to_string()
        };

        let on_berth = self.assignments.entry(berth_id.clone()).or_default();
        let conflicts = on_berth
            .iter()
            .filter(|existing| existing.overlaps(eta, etd))
            .map(|existing| existing.notification_id.value())
            .sorted()
            .join(", ");
        if !conflicts.is_empty() {
            self.is_feasible = false;
            self.warnings.push(format!(
                "Berth {berth_name} ({berth_id}): notification {} overlaps with {conflicts}",
                notification.id
            ));
        }

        on_berth.push(DockAssignment {
            notification_id: notification.id.clone(),
            vessel_id,
            vessel_name,
            berth_id,
            berth_name,
            eta,
            etd,
            estimated_volume: notification.estimated_volume,
        });
        Ok(())
    }

    fn finish(self, date: NaiveDate) -> DailyScheduleResult {
        let berth_schedules = self
            .assignments
            .into_iter()
            .filter(|(_, assignments)| !assignments.is_empty())
            .map(|(berth_id, assignments)| {
                let assignments = assignments
                    .into_iter()
                    .sorted_by(|a, b| {
                        a.eta
                            .cmp(&b.eta)
                            .then_with(|| a.notification_id.cmp(&b.notification_id))
                    })
                    .collect::<Vec<_>>();
                let berth_name = assignments
                    .first()
                    .map_or_else(|| berth_id.value().to_string(), |a| a.berth_name.clone());
                BerthSchedule {
                    berth_id,
                    berth_name,
                    assignments,
                }
            })
            .sorted_by(|a, b| {
                a.berth_name
                    .cmp(&b.berth_name)
                    .then_with(|| a.berth_id.cmp(&b.berth_id))
            })
            .collect();

        DailyScheduleResult {
            date,
            is_feasible: self.is_feasible,
            warnings: self.warnings,
            berth_schedules,
        }
    }
}

/// Arrival ascending with undated calls last, then notification id.
fn arrival_order(a: &ScheduledCall, b: &ScheduledCall) -> Ordering {
    let by_arrival = match (a.notification.arrival_date, b.notification.arrival_date) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_arrival.then_with(|| a.notification.id.cmp(&b.notification.id))
}

/// Check the day's berth assignments for time-window collisions.
///
/// Pure and deterministic: the same calls and berths produce the same report
/// regardless of input order. Per-call problems become warnings; the pass
/// never aborts.
#[must_use]
pub fn compute(date: NaiveDate, calls: &[ScheduledCall], berths: &[Berth]) -> DailyScheduleResult {
    if calls.is_empty() {
        return DailyScheduleResult::empty(date);
    }
    if berths.is_empty() {
        return DailyScheduleResult {
            date,
            is_feasible: false,
            warnings: vec![NO_DOCKS_WARNING.to_string()],
            berth_schedules: Vec::new(),
        };
    }

    let mut plan = DayPlan::new(berths);
    for call in calls.iter().sorted_by(|a, b| arrival_order(a, b)) {
        plan.place(call);
    }
    plan.finish(date)
}
