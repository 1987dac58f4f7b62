#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::domain::shared::{BerthId, OfficerId};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    InProgress,
    Submitted,
    Accepted,
    Rejected,
}

impl NotificationStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Submitted => "submitted",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    #[must_use]
    pub const fn is_editable(&self) -> bool {
        matches!(self, Self::InProgress)
    }
}

impl fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for NotificationStatus {
    type Error = String;

    fn try_from(s: &str) -> std::result::Result<Self, String> {
        match s {
            "in_progress" => Ok(Self::InProgress),
            "submitted" => Ok(Self::Submitted),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            _ => Err(format!("Unknown notification status: {s}")),
        }
    }
}

/// Lifecycle position of a notification together with the data that only
/// exists in that position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NotificationState {
    InProgress,
    Submitted,
    Accepted {
        assigned_berth: Option<BerthId>,
        approved_by: Option<OfficerId>,
    },
    Rejected {
        reason: String,
        rejected_by: OfficerId,
    },
}

impl NotificationState {
    #[must_use]
    pub const fn status(&self) -> NotificationStatus {
        match self {
            Self::InProgress => NotificationStatus::InProgress,
            Self::Submitted => NotificationStatus::Submitted,
            Self::Accepted { .. } => NotificationStatus::Accepted,
            Self::Rejected { .. } => NotificationStatus::Rejected,
        }
    }

    #[must_use]
    pub const fn assigned_berth(&self) -> Option<&BerthId> {
        match self {
            Self::Accepted {
                assigned_berth: Some(berth),
                ..
            } => Some(berth),
            _ => None,
        }
    }

    #[must_use]
    pub fn rejection_reason(&self) -> Option<&str> {
        match self {
            Self::Rejected { reason, .. } => Some(reason.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub const fn decided_by(&self) -> Option<&OfficerId> {
        match self {
            Self::Accepted { approved_by, .. } => approved_by.as_ref(),
            Self::Rejected { rejected_by, .. } => Some(rejected_by),
            Self::InProgress | Self::Submitted => None,
        }
    }
}
