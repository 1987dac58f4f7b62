#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::domain::{BerthId, NotificationId, VesselReference};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Accepted notification as served by the data store for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovedNotification {
    pub id: NotificationId,
    pub referred_vessel: VesselReference,
    pub arrival_date: Option<DateTime<Utc>>,
    pub departure_date: Option<DateTime<Utc>>,
    pub assigned_berth_id: Option<BerthId>,
    #[serde(default)]
    pub estimated_volume: Option<f64>,
    #[serde(default)]
    pub is_hazardous: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Berth {
    pub id: BerthId,
    pub name: String,
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub depth: Option<f64>,
    #[serde(default)]
    pub max_draft: Option<f64>,
    #[serde(default)]
    pub allowed_vessel_types: Vec<String>,
}

impl Berth {
    #[must_use]
    pub fn named(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: BerthId::new(id),
            name: name.into(),
            length: None,
            depth: None,
            max_draft: None,
            allowed_vessel_types: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vessel {
    pub id: String,
    #[serde(alias = "imo")]
    pub registry_number: VesselReference,
    pub name: String,
}
