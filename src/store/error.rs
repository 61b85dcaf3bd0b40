use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Uniqueness violation on `(provider, date, start_time)` among
    /// non-cancelled appointments. A SQL-backed store maps a partial unique
    /// index violation to this same signal.
    #[error("Slot already taken")]
    SlotTaken,

    /// Failure of the persistence layer itself. Propagated to callers
    /// unmodified; retry policy belongs to the backend, not the engine.
    #[error("Storage failure: {0}")]
    Backend(String),
}
