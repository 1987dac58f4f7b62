#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

mod error;
mod ids;

pub use error::{LifecycleError, Result};
pub use ids::{BerthId, NotificationId, OfficerId, VesselReference};
