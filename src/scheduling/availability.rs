use crate::error::SchedulerResult;
use crate::model::{AvailabilityWindow, DayOfWeek, TimeOfDay};

/// Checks every window's internal ordering. Day-of-week range and time syntax
/// are already enforced by the typed fields.
pub fn validate_windows(windows: &[AvailabilityWindow]) -> SchedulerResult<()> {
    for window in windows {
        window.check_ordering()?;
    }
    Ok(())
}

/// True iff `[start, end)` lies entirely inside the union of the given day's
/// windows. Same-day windows may overlap or touch, so they are merged before
/// the containment check; a request spanning two merged-contiguous windows
/// is covered, one spanning a genuine gap is not.
pub fn covers(
    windows: &[AvailabilityWindow],
    day: DayOfWeek,
    start: TimeOfDay,
    end: TimeOfDay,
) -> bool {
    if start >= end {
        return false;
    }

    let mut day_windows: Vec<(u16, u16)> = windows
        .iter()
        .filter(|w| w.day_of_week == day)
        .map(|w| (w.start_time.minutes(), w.end_time.minutes()))
        .collect();
    day_windows.sort_unstable();

    let (start, end) = (start.minutes(), end.minutes());
    let mut merged: Option<(u16, u16)> = None;
    for (win_start, win_end) in day_windows {
        merged = match merged {
            Some((cur_start, cur_end)) if win_start <= cur_end => {
                Some((cur_start, cur_end.max(win_end)))
            }
            _ => Some((win_start, win_end)),
        };
        if let Some((cur_start, cur_end)) = merged {
            if cur_start <= start && end <= cur_end {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(day: u8, start: &str, end: &str) -> AvailabilityWindow {
        AvailabilityWindow::new(day, start, end).unwrap()
    }

    fn day(raw: u8) -> DayOfWeek {
        DayOfWeek::new(raw).unwrap()
    }

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    #[test]
    fn contains_interval_inside_single_window() {
        let windows = vec![window(1, "09:00", "17:00")];
        assert!(covers(&windows, day(1), t("16:30"), t("17:00")));
        assert!(!covers(&windows, day(1), t("16:30"), t("17:30")));
        assert!(!covers(&windows, day(2), t("16:30"), t("17:00")));
    }

    #[test]
    fn unions_overlapping_windows() {
        let windows = vec![window(3, "09:00", "12:00"), window(3, "11:00", "15:00")];
        // Spans the seam between the two raw windows.
        assert!(covers(&windows, day(3), t("11:30"), t("12:30")));
        assert!(covers(&windows, day(3), t("09:00"), t("15:00")));
    }

    #[test]
    fn does_not_bridge_gaps() {
        let windows = vec![window(3, "09:00", "12:00"), window(3, "13:00", "17:00")];
        assert!(!covers(&windows, day(3), t("11:30"), t("13:30")));
        assert!(covers(&windows, day(3), t("13:00"), t("13:30")));
    }

    #[test]
    fn touching_windows_merge() {
        let windows = vec![window(5, "09:00", "12:00"), window(5, "12:00", "15:00")];
        assert!(covers(&windows, day(5), t("11:00"), t("13:00")));
    }

    #[test]
    fn empty_or_inverted_interval_is_never_covered() {
        let windows = vec![window(1, "09:00", "17:00")];
        assert!(!covers(&windows, day(1), t("10:00"), t("10:00")));
        assert!(!covers(&windows, day(1), t("11:00"), t("10:00")));
    }

    #[test]
    fn validate_rejects_inverted_window() {
        let bad = AvailabilityWindow {
            day_of_week: day(1),
            start_time: t("17:00"),
            end_time: t("09:00"),
        };
        assert!(validate_windows(&[bad]).is_err());
        assert!(AvailabilityWindow::new(1, "17:00", "09:00").is_err());
        assert!(AvailabilityWindow::new(9, "09:00", "17:00").is_err());
    }
}
