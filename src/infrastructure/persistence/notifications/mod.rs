#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

mod mapper;
mod memory;
mod postgres;

pub use memory::InMemoryNotificationStore;
pub use postgres::{PgNotificationStore, SCHEMA_SQL};
