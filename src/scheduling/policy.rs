use uuid::Uuid;

use crate::error::{SchedulerError, SchedulerResult};
use crate::model::{Actor, ActorRole, Appointment};

/// Pure predicates over `(actor, resource owners)`. No storage access; the
/// ledger resolves the resource first and asks afterwards.

/// Provider-only mutations on a provider-owned resource.
pub fn is_owning_provider(actor: Actor, provider_id: Uuid) -> bool {
    actor.role == ActorRole::Provider && actor.id == provider_id
}

/// Read and cancel rights: the client or the provider party to the record,
/// acting in the matching role.
pub fn is_party(actor: Actor, appointment: &Appointment) -> bool {
    match actor.role {
        ActorRole::Client => actor.id == appointment.client_id,
        ActorRole::Provider => actor.id == appointment.provider_id,
    }
}

/// Convenience for operations a provider performs on their own aggregate:
/// yields the provider id or denies.
pub fn require_provider(actor: Actor) -> SchedulerResult<Uuid> {
    if actor.role != ActorRole::Provider {
        return Err(SchedulerError::AccessDenied);
    }
    Ok(actor.id)
}

/// Booking entry point is client-only.
pub fn require_client(actor: Actor) -> SchedulerResult<Uuid> {
    if actor.role != ActorRole::Client {
        return Err(SchedulerError::AccessDenied);
    }
    Ok(actor.id)
}
