use rust_decimal::Decimal;
use time::OffsetDateTime;
use uuid::Uuid;
use validator::Validate;

use crate::error::{SchedulerError, SchedulerResult};
use crate::model::{NewServiceOffering, Provider, ServiceOffering, UpdateServiceOffering};

/// Mutations on one provider's offering set. Callers hold the store's write
/// guard; appointments keep their booking-time snapshots, so nothing here
/// touches the ledger.

pub fn add_service(
    provider: &mut Provider,
    new: NewServiceOffering,
) -> SchedulerResult<ServiceOffering> {
    if new.name.trim().is_empty() {
        return Err(SchedulerError::MissingField("name"));
    }
    new.validate()
        .map_err(|e| SchedulerError::InvalidServiceField(e.to_string()))?;
    check_price(new.price)?;

    let service = ServiceOffering {
        id: Uuid::new_v4(),
        name: new.name,
        description: new.description,
        price: new.price,
        duration_minutes: new.duration_minutes,
    };
    provider.services.push(service.clone());
    provider.updated_at = OffsetDateTime::now_utc();
    Ok(service)
}

/// Partial merge: only fields present in the patch are applied. The service
/// id never changes.
pub fn update_service(
    provider: &mut Provider,
    service_id: Uuid,
    patch: UpdateServiceOffering,
) -> SchedulerResult<ServiceOffering> {
    patch
        .validate()
        .map_err(|e| SchedulerError::InvalidServiceField(e.to_string()))?;
    if let Some(price) = patch.price {
        check_price(price)?;
    }
    if matches!(&patch.name, Some(name) if name.trim().is_empty()) {
        return Err(SchedulerError::MissingField("name"));
    }

    let service = provider
        .service_mut(service_id)
        .ok_or(SchedulerError::NotFound("Service"))?;

    if let Some(name) = patch.name {
        service.name = name;
    }
    if let Some(description) = patch.description {
        service.description = description;
    }
    if let Some(price) = patch.price {
        service.price = price;
    }
    if let Some(duration) = patch.duration_minutes {
        service.duration_minutes = duration;
    }

    let updated = service.clone();
    provider.updated_at = OffsetDateTime::now_utc();
    Ok(updated)
}

pub fn remove_service(provider: &mut Provider, service_id: Uuid) -> SchedulerResult<()> {
    let before = provider.services.len();
    provider.services.retain(|s| s.id != service_id);
    if provider.services.len() == before {
        return Err(SchedulerError::NotFound("Service"));
    }
    provider.updated_at = OffsetDateTime::now_utc();
    Ok(())
}

fn check_price(price: Decimal) -> SchedulerResult<()> {
    if price < Decimal::ZERO {
        return Err(SchedulerError::InvalidServiceField(
            "Price must not be negative".into(),
        ));
    }
    Ok(())
}
