use crate::error::SchedulerError;
use crate::model::{Appointment, AvailabilityWindow, DayOfWeek, TimeOfDay};
use crate::scheduling::availability;

/// Why a requested slot was not admitted. Both reasons are conflicts the
/// caller resolves by picking another time, not by fixing input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    OutsideAvailability,
    SlotConflict,
}

impl From<Rejection> for SchedulerError {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::OutsideAvailability => SchedulerError::OutsideAvailability,
            Rejection::SlotConflict => SchedulerError::SlotConflict,
        }
    }
}

/// Decides whether `[start, end)` on the given day is schedulable: it must be
/// contained in the provider's availability union and intersect none of the
/// already-booked intervals. `booked` is the non-cancelled set for the same
/// provider and date, with the record under edit already excluded.
///
/// All interval comparisons are on minutes since midnight; `TimeOfDay`'s
/// ordering guarantees that.
pub fn admit(
    windows: &[AvailabilityWindow],
    booked: &[&Appointment],
    day: DayOfWeek,
    start: TimeOfDay,
    end: TimeOfDay,
) -> Result<(), Rejection> {
    if !availability::covers(windows, day, start, end) {
        return Err(Rejection::OutsideAvailability);
    }
    if booked.iter().any(|existing| existing.overlaps(start, end)) {
        return Err(Rejection::SlotConflict);
    }
    Ok(())
}
