#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

pub mod notification;
pub mod shared;

pub use notification::{
    next_state, CargoManifest, LifecycleEvent, ManifestDirection, ManifestLine,
    NotificationSnapshot, NotificationState, NotificationStatus, VisitNotification,
};
pub use shared::{BerthId, LifecycleError, NotificationId, OfficerId, VesselReference};
