//! Court model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::scheduling::pricing::CourtRates;

/// A bookable court belonging to a center
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Court {
    pub id: Uuid,
    pub center_id: Uuid,
    /// Display name ("Pista 1")
    pub name: String,
    /// Sport played on this court (padel, tennis, ...)
    pub sport: Option<String>,
    /// Price per hour
    pub hourly_rate: Decimal,
    /// Whether the court has artificial lighting
    pub has_lighting: bool,
    /// Lighting surcharge per hour, applied to night bookings
    pub lighting_extra_per_hour: Option<Decimal>,
    /// Inactive courts are hidden from booking flows
    pub active: bool,
    pub crea_date: Option<DateTime<Utc>>,
}

impl Court {
    pub fn rates(&self) -> CourtRates {
        CourtRates {
            hourly_rate: self.hourly_rate,
            has_lighting: self.has_lighting,
            lighting_extra_per_hour: self.lighting_extra_per_hour,
        }
    }
}
