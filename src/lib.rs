//! Appointment scheduling engine: providers publish recurring weekly
//! availability and a catalog of services, clients book slots against them.
//! Admission is atomic, so a provider can never be double-booked.

pub mod config;
pub mod error;
pub mod model;
pub mod scheduling;
pub mod store;

pub use config::SchedulerConfig;
pub use error::{ErrorKind, SchedulerError, SchedulerResult};
pub use scheduling::Scheduler;
pub use store::MemoryStore;
