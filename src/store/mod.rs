mod error;
mod memory;

pub use error::StoreError;
pub use memory::{MemoryStore, StoreState};
