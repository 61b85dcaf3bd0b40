use thiserror::Error;

use crate::model::AppointmentStatus;
use crate::store::StoreError;

/// Transport-agnostic classification of an error. A caller embedding the
/// engine maps these onto its own surface (HTTP statuses, CLI exit codes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller input was malformed; correct the input, do not retry as-is.
    Validation,
    /// Well-formed request that cannot be admitted given current state;
    /// the caller should offer a different slot.
    Conflict,
    /// Actor lacks rights over the resource.
    Authorization,
    /// The resource exists but is not in a compatible state.
    State,
    NotFound,
    /// Persistence-layer failure, propagated unmodified.
    Internal,
}

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid availability window: {0}")]
    InvalidWindow(String),

    #[error("Day of week must be between 0 and 6, got {0}")]
    InvalidDayOfWeek(u8),

    #[error("Invalid time of day: {0}")]
    InvalidTimeOfDay(String),

    #[error("Start time must come before end time")]
    InvalidTimeRange,

    #[error("Invalid service field: {0}")]
    InvalidServiceField(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Requested slot falls outside the provider's availability")]
    OutsideAvailability,

    #[error("Time slot unavailable")]
    SlotConflict,

    #[error("Access denied")]
    AccessDenied,

    #[error("Provider not found")]
    ProviderNotFound,

    #[error("Provider is not accepting appointments")]
    ProviderInactive,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("Appointment is already in a terminal state")]
    AlreadyTerminal,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SchedulerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SchedulerError::MissingField(_)
            | SchedulerError::InvalidWindow(_)
            | SchedulerError::InvalidDayOfWeek(_)
            | SchedulerError::InvalidTimeOfDay(_)
            | SchedulerError::InvalidTimeRange
            | SchedulerError::InvalidServiceField(_)
            | SchedulerError::Validation(_) => ErrorKind::Validation,

            SchedulerError::OutsideAvailability | SchedulerError::SlotConflict => {
                ErrorKind::Conflict
            }

            SchedulerError::AccessDenied => ErrorKind::Authorization,

            SchedulerError::InvalidTransition { .. } | SchedulerError::AlreadyTerminal => {
                ErrorKind::State
            }

            SchedulerError::ProviderNotFound
            | SchedulerError::ProviderInactive
            | SchedulerError::NotFound(_) => ErrorKind::NotFound,

            SchedulerError::Store(_) => ErrorKind::Internal,
        }
    }

    /// True for admission conflicts the caller is expected to retry with a
    /// different slot rather than treat as a hard failure.
    pub fn is_retriable_conflict(&self) -> bool {
        self.kind() == ErrorKind::Conflict
    }
}

pub type SchedulerResult<T> = Result<T, SchedulerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(
            SchedulerError::MissingField("name").kind(),
            ErrorKind::Validation
        );
        assert_eq!(SchedulerError::SlotConflict.kind(), ErrorKind::Conflict);
        assert_eq!(
            SchedulerError::OutsideAvailability.kind(),
            ErrorKind::Conflict
        );
        assert_eq!(SchedulerError::AccessDenied.kind(), ErrorKind::Authorization);
        assert_eq!(SchedulerError::AlreadyTerminal.kind(), ErrorKind::State);
        assert_eq!(SchedulerError::ProviderNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(
            SchedulerError::Store(StoreError::Backend("connection reset".into())).kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn conflicts_are_retriable() {
        assert!(SchedulerError::SlotConflict.is_retriable_conflict());
        assert!(!SchedulerError::AccessDenied.is_retriable_conflict());
    }
}
