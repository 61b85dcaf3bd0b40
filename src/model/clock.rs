use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::Date;

use crate::error::SchedulerError;

/// Time of day in minutes since midnight. Ordering is always numeric, never
/// lexicographic, so "9:00" sorts before "10:00". The value 1440 ("24:00") is
/// permitted only as an exclusive end bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

pub const MINUTES_PER_DAY: u16 = 24 * 60;

impl TimeOfDay {
    pub fn from_minutes(total: u16) -> Result<Self, SchedulerError> {
        if total > MINUTES_PER_DAY {
            return Err(SchedulerError::InvalidTimeOfDay(format!(
                "{total} minutes is past the end of the day"
            )));
        }
        Ok(Self(total))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    /// Advances by `minutes`, or `None` if the result would pass midnight.
    pub fn plus_minutes(self, minutes: u32) -> Option<Self> {
        let total = u32::from(self.0) + minutes;
        u16::try_from(total)
            .ok()
            .filter(|&t| t <= MINUTES_PER_DAY)
            .map(Self)
    }
}

impl FromStr for TimeOfDay {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || SchedulerError::InvalidTimeOfDay(s.to_string());
        let (hours, mins) = s.split_once(':').ok_or_else(malformed)?;
        let hours: u16 = hours.parse().map_err(|_| malformed())?;
        let mins: u16 = mins.parse().map_err(|_| malformed())?;
        if hours > 24 || mins >= 60 {
            return Err(malformed());
        }
        Self::from_minutes(hours * 60 + mins).map_err(|_| malformed())
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = SchedulerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

/// Day of week as `0..=6` with `0 = Sunday`, matching the convention the
/// availability windows are published in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DayOfWeek(u8);

impl DayOfWeek {
    pub fn new(raw: u8) -> Result<Self, SchedulerError> {
        if raw > 6 {
            return Err(SchedulerError::InvalidDayOfWeek(raw));
        }
        Ok(Self(raw))
    }

    pub fn index(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for DayOfWeek {
    type Error = SchedulerError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DayOfWeek> for u8 {
    fn from(value: DayOfWeek) -> Self {
        value.0
    }
}

impl From<Date> for DayOfWeek {
    fn from(date: Date) -> Self {
        Self(date.weekday().number_days_from_sunday())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn parses_and_formats_hh_mm() {
        let t: TimeOfDay = "09:30".parse().unwrap();
        assert_eq!(t.minutes(), 9 * 60 + 30);
        assert_eq!(t.to_string(), "09:30");
        assert_eq!("24:00".parse::<TimeOfDay>().unwrap().minutes(), 1440);
    }

    #[test]
    fn orders_numerically_not_lexicographically() {
        let nine: TimeOfDay = "9:00".parse().unwrap();
        let ten: TimeOfDay = "10:00".parse().unwrap();
        assert!(nine < ten);
        assert!("9:00" > "10:00"); // the string comparison this type exists to avoid
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in ["", "0900", "9:60", "25:00", "aa:bb", "9:"] {
            assert!(bad.parse::<TimeOfDay>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn plus_minutes_stops_at_midnight() {
        let t: TimeOfDay = "23:45".parse().unwrap();
        assert_eq!(t.plus_minutes(15).unwrap().minutes(), 1440);
        assert!(t.plus_minutes(16).is_none());
    }

    #[test]
    fn day_of_week_from_date_uses_sunday_zero() {
        // 2026-01-05 is a Monday.
        assert_eq!(DayOfWeek::from(date!(2026 - 01 - 05)).index(), 1);
        assert_eq!(DayOfWeek::from(date!(2026 - 01 - 04)).index(), 0);
        assert!(DayOfWeek::new(7).is_err());
    }
}
