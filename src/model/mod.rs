mod actor;
mod appointment;
mod clock;
mod provider;

pub use actor::*;
pub use appointment::*;
pub use clock::*;
pub use provider::*;
