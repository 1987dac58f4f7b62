#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use super::NotificationState;
use crate::domain::shared::{BerthId, LifecycleError, OfficerId, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    Submit,
    Accept,
    Approve {
        berth_id: BerthId,
        officer_id: OfficerId,
    },
    Reject {
        reason: String,
        officer_id: OfficerId,
    },
    Resubmit,
    ConvertToDraft,
    UpdateAndResubmit,
}

impl LifecycleEvent {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::Accept => "accept",
            Self::Approve { .. } => "approve",
            Self::Reject { .. } => "reject",
            Self::Resubmit => "resubmit",
            Self::ConvertToDraft => "convert-to-draft",
            Self::UpdateAndResubmit => "update-and-resubmit",
        }
    }
}

/// Computes the state a notification moves to when `event` is applied.
///
/// This is the only place status changes are decided. The caller writes the
/// returned state only after every other guard of the operation has passed.
///
/// # Errors
/// Returns [`LifecycleError::PreconditionFailed`] for `submit`/`accept` from
/// the wrong status and [`LifecycleError::ValidationFailed`] for every other
/// illegal transition or missing argument.
pub fn next_state(current: &NotificationState, event: LifecycleEvent) -> Result<NotificationState> {
    let status = current.status();
    match (current, event) {
        (NotificationState::InProgress, LifecycleEvent::Submit) => Ok(NotificationState::Submitted),
        (_, LifecycleEvent::Submit) => Err(LifecycleError::PreconditionFailed(format!(
            "Notification must be in progress to be submitted (current status: {status})"
        ))),

        (NotificationState::Submitted, LifecycleEvent::Accept) => Ok(NotificationState::Accepted {
            assigned_berth: None,
            approved_by: None,
        }),
        (_, LifecycleEvent::Accept) => Err(LifecycleError::PreconditionFailed(format!(
            "Notification must be submitted to be accepted (current status: {status})"
        ))),

        (
            _,
            LifecycleEvent::Approve {
                berth_id,
                officer_id,
            },
        ) => {
            if berth_id.value().trim().is_empty() {
                return Err(LifecycleError::ValidationFailed(
                    "Berth id is required to approve a notification".to_string(),
                ));
            }
            require_officer(&officer_id)?;
            if status != super::NotificationStatus::Submitted {
                return Err(LifecycleError::ValidationFailed(format!(
                    "Notification must be submitted to be approved (current status: {status})"
                )));
            }
            Ok(NotificationState::Accepted {
                assigned_berth: Some(berth_id),
                approved_by: Some(officer_id),
            })
        }

        (_, LifecycleEvent::Reject { reason, officer_id }) => {
            if reason.trim().is_empty() {
                return Err(LifecycleError::ValidationFailed(
                    "Rejection reason is required".to_string(),
                ));
            }
            require_officer(&officer_id)?;
            if status != super::NotificationStatus::Submitted {
                return Err(LifecycleError::ValidationFailed(format!(
                    "Notification must be submitted to be rejected (current status: {status})"
                )));
            }
            Ok(NotificationState::Rejected {
                reason,
                rejected_by: officer_id,
            })
        }

        (
            NotificationState::Rejected { .. } | NotificationState::InProgress,
            LifecycleEvent::Resubmit,
        ) => Ok(NotificationState::Submitted),
        (_, LifecycleEvent::Resubmit) => Err(LifecycleError::ValidationFailed(format!(
            "Notification must be rejected or in-progress to be resubmitted (current status: {status})"
        ))),

        (NotificationState::Rejected { .. }, LifecycleEvent::ConvertToDraft) => {
            Ok(NotificationState::InProgress)
        }
        (_, LifecycleEvent::ConvertToDraft) => Err(LifecycleError::ValidationFailed(format!(
            "Notification must be rejected to be converted to a draft (current status: {status})"
        ))),

        // Lands in the draft state; submission is a separate step.
        (NotificationState::Rejected { .. }, LifecycleEvent::UpdateAndResubmit) => {
            Ok(NotificationState::InProgress)
        }
        (_, LifecycleEvent::UpdateAndResubmit) => Err(LifecycleError::ValidationFailed(format!(
            "Notification must be rejected to be updated for resubmission (current status: {status})"
        ))),
    }
}

fn require_officer(officer_id: &OfficerId) -> Result<()> {
    if officer_id.is_blank() {
        return Err(LifecycleError::ValidationFailed(
            "Officer id is required".to_string(),
        ));
    }
    Ok(())
}
