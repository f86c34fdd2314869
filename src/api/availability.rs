//! Availability and suggestion endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    scheduling::{Slot, Suggestion},
};

/// Query parameters for court availability
#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailabilityQuery {
    /// Calendar date (YYYY-MM-DD), interpreted in the center's timezone
    pub date: String,
}

/// Availability response; shape matches the reservation-store contract so
/// the two are interchangeable at the boundary
#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityResponse {
    pub slots: Vec<Slot>,
}

/// Bookable slots for a court on a date
#[utoipa::path(
    get,
    path = "/courts/{id}/availability",
    tag = "availability",
    params(("id" = Uuid, Path, description = "Court ID"), AvailabilityQuery),
    responses(
        (status = 200, description = "Ordered slot list", body = AvailabilityResponse),
        (status = 404, description = "Court not found")
    )
)]
pub async fn get_availability(
    State(state): State<crate::AppState>,
    Path(court_id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<AvailabilityResponse>> {
    let date = parse_date(&query.date)?;
    let court = state.services.courts.get(court_id).await?;
    let slots = state.services.availability.slots_for_day(&court, date).await?;
    Ok(Json(AvailabilityResponse { slots }))
}

/// Query parameters for alternative-slot suggestions
#[derive(Debug, Deserialize, IntoParams)]
pub struct SuggestionQuery {
    /// Originally requested date (YYYY-MM-DD)
    pub date: String,
    /// Originally requested time of day; any format the normalizer accepts
    pub time: String,
    /// Requested duration in minutes
    pub duration: u32,
}

/// Suggestion response; order is closest-time-first and must be preserved
#[derive(Debug, Serialize, ToSchema)]
pub struct SuggestionResponse {
    pub suggestions: Vec<Suggestion>,
}

/// Ranked alternative slots around a requested time
#[utoipa::path(
    get,
    path = "/courts/{id}/suggestions",
    tag = "availability",
    params(("id" = Uuid, Path, description = "Court ID"), SuggestionQuery),
    responses(
        (status = 200, description = "Up to 8 ranked alternatives", body = SuggestionResponse),
        (status = 400, description = "Unparseable time")
    )
)]
pub async fn get_suggestions(
    State(state): State<crate::AppState>,
    Path(court_id): Path<Uuid>,
    Query(query): Query<SuggestionQuery>,
) -> AppResult<Json<SuggestionResponse>> {
    let date = parse_date(&query.date)?;
    let suggestions = state
        .services
        .reservations
        .suggest_alternatives(court_id, date, &query.time, query.duration)
        .await?;
    Ok(Json(SuggestionResponse { suggestions }))
}

fn parse_date(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid date '{}' (use YYYY-MM-DD)", raw)))
}
