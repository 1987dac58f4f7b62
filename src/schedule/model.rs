#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::domain::{BerthId, NotificationId};
use crate::gateway::{ApprovedNotification, Berth, Vessel};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of resolving the vessel a notification refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VesselLookup {
    Found(Vessel),
    NotFound,
    TimedOut,
    Failed(String),
}

/// An approved notification together with its resolved vessel.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledCall {
    pub notification: ApprovedNotification,
    pub vessel: VesselLookup,
}

impl ScheduledCall {
    #[must_use]
    pub const fn new(notification: ApprovedNotification, vessel: VesselLookup) -> Self {
        Self {
            notification,
            vessel,
        }
    }
}

/// Everything the engine needs for one day, as fetched from the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct DayPlanInput {
    pub date: NaiveDate,
    pub calls: Vec<ScheduledCall>,
    pub berths: Vec<Berth>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DockAssignment {
    pub notification_id: NotificationId,
    pub vessel_id: Option<String>,
    pub vessel_name: String,
    pub berth_id: BerthId,
    pub berth_name: String,
    pub eta: DateTime<Utc>,
    pub etd: DateTime<Utc>,
    pub estimated_volume: Option<f64>,
}

impl DockAssignment {
    /// Half-open overlap: a call leaving at 12:00 does not collide with one
    /// arriving at 12:00.
    #[must_use]
    pub fn overlaps(&self, eta: DateTime<Utc>, etd: DateTime<Utc>) -> bool {
        self.eta < etd && eta < self.etd
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BerthSchedule {
    pub berth_id: BerthId,
    pub berth_name: String,
    pub assignments: Vec<DockAssignment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyScheduleResult {
    pub date: NaiveDate,
    pub is_feasible: bool,
    pub warnings: Vec<String>,
    pub berth_schedules: Vec<BerthSchedule>,
}

impl DailyScheduleResult {
    #[must_use]
    pub const fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            is_feasible: true,
            warnings: Vec::new(),
            berth_schedules: Vec::new(),
        }
    }

    #[must_use]
    pub fn assignment_count(&self) -> usize {
        self.berth_schedules
            .iter()
            .map(|schedule| schedule.assignments.len())
            .sum()
    }
}
