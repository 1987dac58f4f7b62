#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

mod manifest;
mod state;
mod transition;
mod visit_notification;

pub use manifest::{CargoManifest, ManifestDirection, ManifestLine};
pub use state::{NotificationState, NotificationStatus};
pub use transition::{next_state, LifecycleEvent};
pub use visit_notification::{NotificationSnapshot, VisitNotification};

#[cfg(test)]
mod tests;
