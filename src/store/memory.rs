use std::collections::HashMap;
use time::Date;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::model::{Appointment, AppointmentStatus, Provider};
use crate::store::StoreError;

/// In-memory store for provider aggregates and the appointment ledger.
///
/// All state sits behind one `RwLock`; a write guard held across a
/// validate-then-persist section is the mutual exclusion the admission path
/// requires (two concurrent bookings for the same slot serialize here, and
/// the loser sees the winner's row). [`StoreState::insert_appointment`]
/// additionally re-asserts the slot uniqueness itself, so a backend that
/// enforces it with a unique index reports the identical [`StoreError`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<StoreState>,
}

#[derive(Debug, Default)]
pub struct StoreState {
    providers: HashMap<Uuid, Provider>,
    appointments: HashMap<Uuid, Appointment>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().await
    }

    /// Guard for a single atomic section: everything done while holding it is
    /// observed as one unit by all other operations.
    pub async fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().await
    }
}

impl StoreState {
    pub fn insert_provider(&mut self, provider: Provider) {
        self.providers.insert(provider.id, provider);
    }

    pub fn provider(&self, id: Uuid) -> Option<&Provider> {
        self.providers.get(&id)
    }

    pub fn provider_mut(&mut self, id: Uuid) -> Option<&mut Provider> {
        self.providers.get_mut(&id)
    }

    pub fn providers(&self) -> impl Iterator<Item = &Provider> {
        self.providers.values()
    }

    pub fn appointment(&self, id: Uuid) -> Option<&Appointment> {
        self.appointments.get(&id)
    }

    pub fn appointment_mut(&mut self, id: Uuid) -> Option<&mut Appointment> {
        self.appointments.get_mut(&id)
    }

    /// Persists a new appointment, enforcing that no other non-cancelled
    /// appointment holds the same `(provider, date, start_time)`.
    pub fn insert_appointment(&mut self, appointment: Appointment) -> Result<(), StoreError> {
        let taken = self.appointments.values().any(|existing| {
            existing.status != AppointmentStatus::Cancelled
                && existing.provider_id == appointment.provider_id
                && existing.date == appointment.date
                && existing.start_time == appointment.start_time
        });
        if taken {
            return Err(StoreError::SlotTaken);
        }
        self.appointments.insert(appointment.id, appointment);
        Ok(())
    }

    /// Non-cancelled appointments for one provider on one date, optionally
    /// excluding a record being re-validated after an edit.
    pub fn booked_slots(
        &self,
        provider_id: Uuid,
        date: Date,
        exclude: Option<Uuid>,
    ) -> Vec<&Appointment> {
        self.appointments
            .values()
            .filter(|a| {
                a.provider_id == provider_id
                    && a.date == date
                    && a.status != AppointmentStatus::Cancelled
                    && Some(a.id) != exclude
            })
            .collect()
    }

    pub fn appointments_for_client(&self, client_id: Uuid) -> Vec<Appointment> {
        let mut found: Vec<_> = self
            .appointments
            .values()
            .filter(|a| a.client_id == client_id)
            .cloned()
            .collect();
        found.sort_by_key(|a| (a.date, a.start_time));
        found
    }

    pub fn appointments_for_provider(&self, provider_id: Uuid) -> Vec<Appointment> {
        let mut found: Vec<_> = self
            .appointments
            .values()
            .filter(|a| a.provider_id == provider_id)
            .cloned()
            .collect();
        found.sort_by_key(|a| (a.date, a.start_time));
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ServiceSnapshot;
    use rust_decimal::Decimal;
    use time::macros::date;
    use time::OffsetDateTime;

    fn appointment(provider_id: Uuid, start: &str, status: AppointmentStatus) -> Appointment {
        let start_time: crate::model::TimeOfDay = start.parse().unwrap();
        Appointment {
            id: Uuid::new_v4(),
            provider_id,
            client_id: Uuid::new_v4(),
            service: ServiceSnapshot {
                name: "Haircut".into(),
                price: Decimal::from(20),
                duration_minutes: 30,
            },
            date: date!(2026 - 01 - 05),
            start_time,
            end_time: start_time.plus_minutes(30).unwrap(),
            status,
            notes: None,
            cancelled_at: None,
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn rejects_duplicate_live_slot() {
        let provider_id = Uuid::new_v4();
        let mut state = StoreState::default();
        state
            .insert_appointment(appointment(provider_id, "10:00", AppointmentStatus::Scheduled))
            .unwrap();

        let dup = appointment(provider_id, "10:00", AppointmentStatus::Scheduled);
        assert!(matches!(
            state.insert_appointment(dup),
            Err(StoreError::SlotTaken)
        ));
    }

    #[test]
    fn cancelled_rows_do_not_hold_the_slot() {
        let provider_id = Uuid::new_v4();
        let mut state = StoreState::default();
        state
            .insert_appointment(appointment(provider_id, "10:00", AppointmentStatus::Cancelled))
            .unwrap();

        state
            .insert_appointment(appointment(provider_id, "10:00", AppointmentStatus::Scheduled))
            .unwrap();
    }

    #[test]
    fn booked_slots_filters_cancelled_and_excluded() {
        let provider_id = Uuid::new_v4();
        let mut state = StoreState::default();
        let kept = appointment(provider_id, "09:00", AppointmentStatus::Confirmed);
        let kept_id = kept.id;
        state.insert_appointment(kept).unwrap();
        state
            .insert_appointment(appointment(provider_id, "10:00", AppointmentStatus::Cancelled))
            .unwrap();

        let slots = state.booked_slots(provider_id, date!(2026 - 01 - 05), None);
        assert_eq!(slots.len(), 1);

        let slots = state.booked_slots(provider_id, date!(2026 - 01 - 05), Some(kept_id));
        assert!(slots.is_empty());
    }
}
