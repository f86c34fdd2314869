//! Pricing API endpoints

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    api::validate_body,
    error::AppResult,
    scheduling::{pricing::OverrideValidation, PriceBreakdown},
};

/// Pricing calculation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    pub court_id: Uuid,
    /// Booking start instant (ISO-8601)
    pub start_time: DateTime<Utc>,
    /// Duration in minutes
    #[validate(range(min = 5, max = 480))]
    pub duration: u32,
    /// Accepted for parity with the booking flow; not used in pricing
    pub user_id: Option<Uuid>,
}

/// Pricing calculation response
#[derive(Debug, Serialize, ToSchema)]
pub struct CalculateResponse {
    pub pricing: PriceBreakdown,
}

/// Compute the price breakdown for a booking
#[utoipa::path(
    post,
    path = "/pricing/calculate",
    tag = "pricing",
    request_body = CalculateRequest,
    responses(
        (status = 200, description = "Price breakdown", body = CalculateResponse),
        (status = 404, description = "Court not found")
    )
)]
pub async fn calculate(
    State(state): State<crate::AppState>,
    Json(request): Json<CalculateRequest>,
) -> AppResult<Json<CalculateResponse>> {
    validate_body(&request)?;
    let pricing = state
        .services
        .pricing
        .calculate_for_court(request.court_id, request.start_time, request.duration)
        .await?;
    Ok(Json(CalculateResponse { pricing }))
}

/// Override bounds-check request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidateOverrideRequest {
    /// Signed override delta
    pub amount: Decimal,
    /// Computed final total the delta applies to
    pub base_total: Decimal,
}

/// Check a manual override against the configured bound
#[utoipa::path(
    post,
    path = "/pricing/validate-override",
    tag = "pricing",
    request_body = ValidateOverrideRequest,
    responses(
        (status = 200, description = "Validation outcome", body = OverrideValidation)
    )
)]
pub async fn validate_override(
    State(state): State<crate::AppState>,
    Json(request): Json<ValidateOverrideRequest>,
) -> AppResult<Json<OverrideValidation>> {
    let outcome = state.services.pricing.validate_override(request.amount, request.base_total);
    Ok(Json(outcome))
}
