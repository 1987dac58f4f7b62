#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

pub mod config;
pub mod domain;
pub mod error;
pub mod gateway;
pub mod infrastructure;
pub mod lifecycle_service;
pub mod ports;
pub mod schedule;

pub use config::Config;
pub use error::{PortCallError, Result};
pub use gateway::HttpPortDataGateway;
pub use infrastructure::{InMemoryNotificationStore, PgNotificationStore};
pub use lifecycle_service::NotificationLifecycleService;
pub use ports::{Credential, NotificationStore, PortDataGateway, StoredNotification};
pub use schedule::{DailyScheduleResult, DailyScheduleService, ScheduleSettings};
