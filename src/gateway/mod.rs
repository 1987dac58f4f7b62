#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

mod http;
mod records;

pub use http::HttpPortDataGateway;
pub use records::{ApprovedNotification, Berth, Vessel};
