#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

mod engine;
mod model;
mod service;

pub use engine::{compute, NO_DOCKS_WARNING};
pub use model::{
    BerthSchedule, DailyScheduleResult, DayPlanInput, DockAssignment, ScheduledCall, VesselLookup,
};
pub use service::{parse_schedule_date, DailyScheduleService, ScheduleSettings};
