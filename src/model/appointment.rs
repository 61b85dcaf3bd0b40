use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use time::{Date, OffsetDateTime};
use uuid::Uuid;
use validator::Validate;

use crate::model::clock::TimeOfDay;
use crate::model::provider::ServiceOffering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    /// Cancelled and completed appointments never leave that state.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }

    /// Provider-driven transitions are only allowed out of the two live
    /// states. `NoShow` has no outgoing transitions either, but is kept
    /// distinct from the terminal pair for cancellation error reporting.
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(self, Self::Scheduled | Self::Confirmed)
            && matches!(
                next,
                Self::Confirmed | Self::Completed | Self::Cancelled | Self::NoShow
            )
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::NoShow => write!(f, "no_show"),
        }
    }
}

/// Service data copied at booking time. Later edits to the provider's live
/// catalog must not alter appointments that already reference it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSnapshot {
    pub name: String,
    pub price: Decimal,
    pub duration_minutes: u32,
}

impl From<&ServiceOffering> for ServiceSnapshot {
    fn from(service: &ServiceOffering) -> Self {
        Self {
            name: service.name.clone(),
            price: service.price,
            duration_minutes: service.duration_minutes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub client_id: Uuid,
    pub service: ServiceSnapshot,
    pub date: Date,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub cancelled_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Appointment {
    /// Half-open interval test: adjacent appointments do not overlap.
    pub fn overlaps(&self, start: TimeOfDay, end: TimeOfDay) -> bool {
        self.start_time < end && start < self.end_time
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAppointmentRequest {
    pub provider_id: Uuid,
    pub service_id: Uuid,
    pub date: Date,
    pub start_time: TimeOfDay,
    /// Derived from the service's duration when omitted.
    pub end_time: Option<TimeOfDay>,
    #[validate(length(max = 500, message = "Notes must be at most 500 characters"))]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheduled_and_confirmed_are_live() {
        use AppointmentStatus::*;
        for from in [Scheduled, Confirmed] {
            for to in [Confirmed, Completed, Cancelled, NoShow] {
                assert!(from.can_transition_to(to), "{from} -> {to} should hold");
            }
            assert!(!from.can_transition_to(Scheduled));
        }
    }

    #[test]
    fn no_transitions_out_of_settled_states() {
        use AppointmentStatus::*;
        for from in [Completed, Cancelled, NoShow] {
            for to in [Scheduled, Confirmed, Completed, Cancelled, NoShow] {
                assert!(!from.can_transition_to(to), "{from} -> {to} should fail");
            }
        }
        assert!(Completed.is_terminal());
        assert!(Cancelled.is_terminal());
        assert!(!NoShow.is_terminal());
    }

    fn fixture() -> Appointment {
        Appointment {
            id: Uuid::new_v4(),
            provider_id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            service: ServiceSnapshot {
                name: "Haircut".into(),
                price: Decimal::from(20),
                duration_minutes: 30,
            },
            date: time::macros::date!(2026 - 01 - 05),
            start_time: "10:00".parse().unwrap(),
            end_time: "10:30".parse().unwrap(),
            status: AppointmentStatus::Scheduled,
            notes: None,
            cancelled_at: None,
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn overlap_is_half_open() {
        let appt = fixture();
        assert!(appt.overlaps("10:15".parse().unwrap(), "10:45".parse().unwrap()));
        assert!(!appt.overlaps("10:30".parse().unwrap(), "11:00".parse().unwrap()));
        assert!(!appt.overlaps("09:30".parse().unwrap(), "10:00".parse().unwrap()));
    }

    #[test]
    fn serializes_to_the_wire_format() {
        let value = serde_json::to_value(fixture()).unwrap();
        assert_eq!(value["status"], "scheduled");
        assert_eq!(value["start_time"], "10:00");
        assert_eq!(value["end_time"], "10:30");
        assert_eq!(value["date"], "2026-01-05");
        assert_eq!(value["cancelled_at"], serde_json::Value::Null);
    }
}
