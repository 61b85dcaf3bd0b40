pub mod availability;
pub mod catalog;
pub mod ledger;
pub mod policy;
pub mod validator;

pub use ledger::Scheduler;
