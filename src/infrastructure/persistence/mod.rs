#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

pub mod notifications;

pub use notifications::{InMemoryNotificationStore, PgNotificationStore, SCHEMA_SQL};
