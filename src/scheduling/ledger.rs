use std::sync::Arc;
use time::{Date, OffsetDateTime};
use tracing::{debug, info};
use uuid::Uuid;
use ::validator::Validate;

use crate::config::SchedulerConfig;
use crate::error::{SchedulerError, SchedulerResult};
use crate::model::{
    Actor, ActorRole, Appointment, AppointmentStatus, AvailabilityWindow,
    CreateAppointmentRequest, DayOfWeek, NewServiceOffering, Provider, ServiceOffering,
    ServiceSnapshot, TimeOfDay, UpdateServiceOffering,
};
use crate::scheduling::{availability, catalog, policy, validator};
use crate::store::{MemoryStore, StoreError};

/// The appointment ledger: authoritative store of appointment records and the
/// lifecycle state machine, plus the provider-facing availability and catalog
/// operations that feed admission decisions.
///
/// Admission ("is the slot free" + "persist the record") runs under a single
/// store write guard, so two concurrent bookings for the same slot serialize
/// and exactly one wins; the loser gets `SlotConflict`.
pub struct Scheduler {
    store: Arc<MemoryStore>,
    config: SchedulerConfig,
}

impl Scheduler {
    pub fn new(store: Arc<MemoryStore>, config: SchedulerConfig) -> Self {
        Self { store, config }
    }

    // ---- provider registry ----

    pub async fn register_provider(
        &self,
        name: &str,
        bio: Option<String>,
    ) -> SchedulerResult<Provider> {
        if name.trim().is_empty() {
            return Err(SchedulerError::MissingField("name"));
        }
        if matches!(&bio, Some(b) if b.chars().count() > 500) {
            return Err(SchedulerError::Validation(
                "Bio must be at most 500 characters".into(),
            ));
        }

        let provider = Provider::new(name.to_string(), bio);
        let mut state = self.store.write().await;
        state.insert_provider(provider.clone());
        info!(provider_id = %provider.id, "provider registered");
        Ok(provider)
    }

    /// Inactive providers are indistinguishable from absent ones on the read
    /// path.
    pub async fn get_provider(&self, provider_id: Uuid) -> SchedulerResult<Provider> {
        let state = self.store.read().await;
        state
            .provider(provider_id)
            .filter(|p| p.is_active)
            .cloned()
            .ok_or(SchedulerError::ProviderNotFound)
    }

    pub async fn list_providers(&self) -> Vec<Provider> {
        let state = self.store.read().await;
        let mut providers: Vec<_> = state.providers().filter(|p| p.is_active).cloned().collect();
        providers.sort_by(|a, b| a.name.cmp(&b.name));
        providers
    }

    /// Deactivation keeps history: existing appointments stay on the ledger,
    /// but no new bookings are admitted.
    pub async fn deactivate_provider(&self, actor: Actor) -> SchedulerResult<()> {
        let provider_id = policy::require_provider(actor)?;
        let mut state = self.store.write().await;
        let provider = state
            .provider_mut(provider_id)
            .ok_or(SchedulerError::ProviderNotFound)?;
        provider.is_active = false;
        provider.updated_at = OffsetDateTime::now_utc();
        info!(provider_id = %provider_id, "provider deactivated");
        Ok(())
    }

    // ---- availability ----

    /// Replaces the provider's entire weekly schedule in one step. Never a
    /// merge: what is passed in is what stands afterwards.
    pub async fn set_availability(
        &self,
        actor: Actor,
        windows: Vec<AvailabilityWindow>,
    ) -> SchedulerResult<Vec<AvailabilityWindow>> {
        let provider_id = policy::require_provider(actor)?;
        if windows.len() > self.config.max_windows_per_provider {
            return Err(SchedulerError::Validation(format!(
                "At most {} availability windows are allowed",
                self.config.max_windows_per_provider
            )));
        }
        availability::validate_windows(&windows)?;

        let mut state = self.store.write().await;
        let provider = state
            .provider_mut(provider_id)
            .ok_or(SchedulerError::ProviderNotFound)?;
        provider.availability = windows;
        provider.updated_at = OffsetDateTime::now_utc();
        info!(provider_id = %provider_id, windows = provider.availability.len(), "availability replaced");
        Ok(provider.availability.clone())
    }

    // ---- service catalog ----

    pub async fn add_service(
        &self,
        actor: Actor,
        new: NewServiceOffering,
    ) -> SchedulerResult<ServiceOffering> {
        let provider_id = policy::require_provider(actor)?;
        let mut state = self.store.write().await;
        let provider = state
            .provider_mut(provider_id)
            .ok_or(SchedulerError::ProviderNotFound)?;
        let service = catalog::add_service(provider, new)?;
        info!(provider_id = %provider_id, service_id = %service.id, "service added");
        Ok(service)
    }

    pub async fn update_service(
        &self,
        actor: Actor,
        service_id: Uuid,
        patch: UpdateServiceOffering,
    ) -> SchedulerResult<ServiceOffering> {
        let provider_id = policy::require_provider(actor)?;
        let mut state = self.store.write().await;
        let provider = state
            .provider_mut(provider_id)
            .ok_or(SchedulerError::ProviderNotFound)?;
        catalog::update_service(provider, service_id, patch)
    }

    /// Appointments booked against the removed service keep their snapshots.
    pub async fn remove_service(&self, actor: Actor, service_id: Uuid) -> SchedulerResult<()> {
        let provider_id = policy::require_provider(actor)?;
        let mut state = self.store.write().await;
        let provider = state
            .provider_mut(provider_id)
            .ok_or(SchedulerError::ProviderNotFound)?;
        catalog::remove_service(provider, service_id)
    }

    // ---- appointment lifecycle ----

    /// Books a slot for the acting client. The availability check, conflict
    /// scan and persist all happen under one write guard; the store's own
    /// uniqueness assertion backs the conflict scan up.
    pub async fn create_appointment(
        &self,
        actor: Actor,
        request: CreateAppointmentRequest,
    ) -> SchedulerResult<Appointment> {
        let client_id = policy::require_client(actor)?;
        request
            .validate()
            .map_err(|e| SchedulerError::Validation(e.to_string()))?;

        let mut state = self.store.write().await;

        let provider = state
            .provider(request.provider_id)
            .ok_or(SchedulerError::ProviderNotFound)?;
        if !provider.is_active {
            return Err(SchedulerError::ProviderInactive);
        }
        let service = provider
            .service(request.service_id)
            .ok_or(SchedulerError::NotFound("Service"))?;
        let snapshot = ServiceSnapshot::from(service);
        let windows = provider.availability.clone();

        let start = request.start_time;
        let end = self.resolve_end_time(start, request.end_time, snapshot.duration_minutes)?;
        let day = DayOfWeek::from(request.date);

        let booked = state.booked_slots(request.provider_id, request.date, None);
        if let Err(rejection) = validator::admit(&windows, &booked, day, start, end) {
            debug!(
                provider_id = %request.provider_id,
                date = %request.date,
                start = %start,
                ?rejection,
                "booking rejected"
            );
            return Err(rejection.into());
        }

        let now = OffsetDateTime::now_utc();
        let appointment = Appointment {
            id: Uuid::new_v4(),
            provider_id: request.provider_id,
            client_id,
            service: snapshot,
            date: request.date,
            start_time: start,
            end_time: end,
            status: AppointmentStatus::Scheduled,
            notes: request.notes,
            cancelled_at: None,
            created_at: now,
            updated_at: now,
        };

        state
            .insert_appointment(appointment.clone())
            .map_err(|e| match e {
                StoreError::SlotTaken => SchedulerError::SlotConflict,
                other => SchedulerError::Store(other),
            })?;

        info!(
            appointment_id = %appointment.id,
            provider_id = %appointment.provider_id,
            date = %appointment.date,
            start = %appointment.start_time,
            "appointment scheduled"
        );
        Ok(appointment)
    }

    /// Moves a live appointment to a new slot, re-running the same atomic
    /// admission with the record's own current slot excluded from the
    /// conflict scan.
    pub async fn reschedule_appointment(
        &self,
        actor: Actor,
        appointment_id: Uuid,
        date: Date,
        start_time: TimeOfDay,
        end_time: Option<TimeOfDay>,
    ) -> SchedulerResult<Appointment> {
        let mut state = self.store.write().await;

        let appointment = state
            .appointment(appointment_id)
            .ok_or(SchedulerError::NotFound("Appointment"))?;
        if !policy::is_party(actor, appointment) {
            return Err(SchedulerError::AccessDenied);
        }
        if !matches!(
            appointment.status,
            AppointmentStatus::Scheduled | AppointmentStatus::Confirmed
        ) {
            return Err(SchedulerError::AlreadyTerminal);
        }
        let provider_id = appointment.provider_id;
        let duration = appointment.service.duration_minutes;

        let provider = state
            .provider(provider_id)
            .ok_or(SchedulerError::ProviderNotFound)?;
        if !provider.is_active {
            return Err(SchedulerError::ProviderInactive);
        }
        let windows = provider.availability.clone();

        let end = self.resolve_end_time(start_time, end_time, duration)?;
        let day = DayOfWeek::from(date);
        let booked = state.booked_slots(provider_id, date, Some(appointment_id));
        validator::admit(&windows, &booked, day, start_time, end)
            .map_err(SchedulerError::from)?;

        let appointment = state
            .appointment_mut(appointment_id)
            .ok_or(SchedulerError::NotFound("Appointment"))?;
        appointment.date = date;
        appointment.start_time = start_time;
        appointment.end_time = end;
        appointment.updated_at = OffsetDateTime::now_utc();
        info!(appointment_id = %appointment_id, date = %date, start = %start_time, "appointment moved");
        Ok(appointment.clone())
    }

    /// Provider-driven lifecycle transition. The precondition check sits
    /// inside the same write guard as the update, so two racing transitions
    /// on one appointment serialize and the second sees the first's state.
    pub async fn set_status(
        &self,
        actor: Actor,
        appointment_id: Uuid,
        new_status: AppointmentStatus,
    ) -> SchedulerResult<Appointment> {
        let mut state = self.store.write().await;
        let appointment = state
            .appointment_mut(appointment_id)
            .ok_or(SchedulerError::NotFound("Appointment"))?;
        if !policy::is_owning_provider(actor, appointment.provider_id) {
            return Err(SchedulerError::AccessDenied);
        }
        if !appointment.status.can_transition_to(new_status) {
            return Err(SchedulerError::InvalidTransition {
                from: appointment.status,
                to: new_status,
            });
        }

        let now = OffsetDateTime::now_utc();
        appointment.status = new_status;
        if new_status == AppointmentStatus::Cancelled {
            appointment.cancelled_at = Some(now);
        }
        appointment.updated_at = now;
        info!(appointment_id = %appointment_id, status = %new_status, "appointment status updated");
        Ok(appointment.clone())
    }

    /// Cancellation by either party. Not idempotent: cancelling an already
    /// settled appointment is an error, not a no-op.
    pub async fn cancel_appointment(
        &self,
        actor: Actor,
        appointment_id: Uuid,
    ) -> SchedulerResult<Appointment> {
        let mut state = self.store.write().await;
        let appointment = state
            .appointment_mut(appointment_id)
            .ok_or(SchedulerError::NotFound("Appointment"))?;
        if !policy::is_party(actor, appointment) {
            return Err(SchedulerError::AccessDenied);
        }
        match appointment.status {
            AppointmentStatus::Cancelled | AppointmentStatus::Completed => {
                return Err(SchedulerError::AlreadyTerminal)
            }
            AppointmentStatus::NoShow => {
                return Err(SchedulerError::InvalidTransition {
                    from: AppointmentStatus::NoShow,
                    to: AppointmentStatus::Cancelled,
                })
            }
            AppointmentStatus::Scheduled | AppointmentStatus::Confirmed => {}
        }

        let now = OffsetDateTime::now_utc();
        appointment.status = AppointmentStatus::Cancelled;
        appointment.cancelled_at = Some(now);
        appointment.updated_at = now;
        info!(appointment_id = %appointment_id, "appointment cancelled");
        Ok(appointment.clone())
    }

    pub async fn get_appointment(
        &self,
        actor: Actor,
        appointment_id: Uuid,
    ) -> SchedulerResult<Appointment> {
        let state = self.store.read().await;
        let appointment = state
            .appointment(appointment_id)
            .ok_or(SchedulerError::NotFound("Appointment"))?;
        if !policy::is_party(actor, appointment) {
            return Err(SchedulerError::AccessDenied);
        }
        Ok(appointment.clone())
    }

    /// A client sees their own bookings, a provider their own calendar.
    pub async fn list_appointments(&self, actor: Actor) -> Vec<Appointment> {
        let state = self.store.read().await;
        match actor.role {
            ActorRole::Client => state.appointments_for_client(actor.id),
            ActorRole::Provider => state.appointments_for_provider(actor.id),
        }
    }

    fn resolve_end_time(
        &self,
        start: TimeOfDay,
        requested_end: Option<TimeOfDay>,
        duration_minutes: u32,
    ) -> SchedulerResult<TimeOfDay> {
        match requested_end {
            // A derived end past midnight cannot sit inside any window.
            None => start
                .plus_minutes(duration_minutes)
                .ok_or(SchedulerError::OutsideAvailability),
            Some(end) => {
                if end <= start {
                    return Err(SchedulerError::InvalidTimeRange);
                }
                if self.config.enforce_service_duration {
                    let slot = u32::from(end.minutes() - start.minutes());
                    if slot != duration_minutes {
                        return Err(SchedulerError::Validation(format!(
                            "Slot of {slot} minutes does not match the service duration of {duration_minutes} minutes"
                        )));
                    }
                }
                Ok(end)
            }
        }
    }
}
