use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;
use validator::Validate;

use crate::error::{SchedulerError, SchedulerResult};
use crate::model::clock::{DayOfWeek, TimeOfDay};

/// One recurring weekly open-hours interval. Windows for the same day may
/// overlap in the raw model; containment queries union them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    pub day_of_week: DayOfWeek,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl AvailabilityWindow {
    pub fn new(day_of_week: u8, start_time: &str, end_time: &str) -> SchedulerResult<Self> {
        let window = Self {
            day_of_week: DayOfWeek::new(day_of_week)?,
            start_time: start_time.parse()?,
            end_time: end_time.parse()?,
        };
        window.check_ordering()?;
        Ok(window)
    }

    /// Windows can also be built by deserialization, which bypasses `new`, so
    /// the replace operation re-checks ordering on every entry.
    pub fn check_ordering(&self) -> SchedulerResult<()> {
        if self.start_time >= self.end_time {
            return Err(SchedulerError::InvalidWindow(format!(
                "{} does not come before {}",
                self.start_time, self.end_time
            )));
        }
        Ok(())
    }
}

/// A bookable offering. The id is issued once at creation, is stable across
/// edits and is never reused, so clients may hold onto it between reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceOffering {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub duration_minutes: u32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewServiceOffering {
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: String,
    #[validate(length(max = 300, message = "Description must be at most 300 characters"))]
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[validate(range(min = 1, message = "Duration must be at least 1 minute"))]
    pub duration_minutes: u32,
}

/// Partial update: only provided fields are merged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateServiceOffering {
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 300, message = "Description must be at most 300 characters"))]
    pub description: Option<String>,
    pub price: Option<Decimal>,
    #[validate(range(min = 1, message = "Duration must be at least 1 minute"))]
    pub duration_minutes: Option<u32>,
}

/// Aggregate root owning a weekly schedule and a service catalog. Identity
/// profile details (credentials, contact data) live with the external
/// identity collaborator, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    pub id: Uuid,
    pub name: String,
    pub bio: Option<String>,
    pub is_active: bool,
    pub services: Vec<ServiceOffering>,
    pub availability: Vec<AvailabilityWindow>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Provider {
    pub fn new(name: String, bio: Option<String>) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: Uuid::new_v4(),
            name,
            bio,
            is_active: true,
            services: Vec::new(),
            availability: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn service(&self, service_id: Uuid) -> Option<&ServiceOffering> {
        self.services.iter().find(|s| s.id == service_id)
    }

    pub fn service_mut(&mut self, service_id: Uuid) -> Option<&mut ServiceOffering> {
        self.services.iter_mut().find(|s| s.id == service_id)
    }
}
