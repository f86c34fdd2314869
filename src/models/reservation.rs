//! Reservation model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Reservation lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    /// Whether this reservation blocks its slot
    pub fn blocks_availability(&self) -> bool {
        !matches!(self, ReservationStatus::Cancelled)
    }
}

/// Reservation model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Reservation {
    pub id: Uuid,
    pub court_id: Uuid,
    pub user_id: Option<Uuid>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: ReservationStatus,
    /// Final price charged, including any manual override
    pub total_price: Option<Decimal>,
    pub override_amount: Option<Decimal>,
    pub override_reason: Option<String>,
    pub notes: Option<String>,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

/// Manual price adjustment; delta on top of the computed total
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct PriceOverride {
    /// Signed delta, not an absolute price
    pub amount: Decimal,
    /// Mandatory justification
    #[validate(length(min = 5, message = "Override reason must be at least 5 characters"))]
    pub reason: String,
}

/// Payment details forwarded to the gateway; protocol is opaque to us
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentInfo {
    /// Payment method identifier (cash, card, ...)
    pub method: String,
    pub amount: Option<Decimal>,
    pub reason: Option<String>,
    pub details: Option<serde_json::Value>,
}

/// Create reservation request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservation {
    pub user_id: Option<Uuid>,
    pub court_id: Uuid,
    /// Booking start instant (ISO-8601)
    pub start_time: DateTime<Utc>,
    /// Duration in minutes
    #[validate(range(min = 5, max = 480, message = "Duration must be between 5 and 480 minutes"))]
    pub duration: u32,
    pub notes: Option<String>,
    pub payment: Option<PaymentInfo>,
    #[validate(nested)]
    pub pricing_override: Option<PriceOverride>,
    /// Whether confirmation notifications should be sent (delivery handled
    /// by an external system)
    #[serde(default)]
    pub send_notifications: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_does_not_block_availability() {
        assert!(!ReservationStatus::Cancelled.blocks_availability());
        assert!(ReservationStatus::Pending.blocks_availability());
        assert!(ReservationStatus::Confirmed.blocks_availability());
        assert!(ReservationStatus::Completed.blocks_availability());
    }
}
