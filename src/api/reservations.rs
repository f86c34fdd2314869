//! Reservation API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    api::validate_body,
    error::{AppResult, ErrorCode},
    models::reservation::{CreateReservation, Reservation},
    scheduling::Suggestion,
    services::reservations::CreateOutcome,
};

/// Conflict response: the booking collided with an existing reservation and
/// these are the closest open alternatives, best first
#[derive(Debug, Serialize, ToSchema)]
pub struct ConflictResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
    pub suggestions: Vec<Suggestion>,
}

/// Create a reservation
#[utoipa::path(
    post,
    path = "/reservations",
    tag = "reservations",
    request_body = CreateReservation,
    responses(
        (status = 201, description = "Reservation created", body = Reservation),
        (status = 409, description = "Slot already taken; alternatives attached", body = ConflictResponse),
        (status = 422, description = "Override out of bounds")
    )
)]
pub async fn create_reservation(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateReservation>,
) -> AppResult<Response> {
    validate_body(&data)?;
    match state.services.reservations.create_with_alternatives(data).await? {
        CreateOutcome::Created(reservation) => {
            Ok((StatusCode::CREATED, Json(reservation)).into_response())
        }
        CreateOutcome::Conflict { message, suggestions } => {
            let body = ConflictResponse {
                code: ErrorCode::SlotConflict as u32,
                error: format!("{:?}", ErrorCode::SlotConflict),
                message,
                suggestions,
            };
            Ok((StatusCode::CONFLICT, Json(body)).into_response())
        }
    }
}

/// Get a reservation
#[utoipa::path(
    get,
    path = "/reservations/{id}",
    tag = "reservations",
    params(("id" = Uuid, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation", body = Reservation),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn get_reservation(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Reservation>> {
    let reservation = state.services.reservations.get(id).await?;
    Ok(Json(reservation))
}

/// Cancel a reservation
#[utoipa::path(
    delete,
    path = "/reservations/{id}",
    tag = "reservations",
    params(("id" = Uuid, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation cancelled", body = Reservation),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn cancel_reservation(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Reservation>> {
    let reservation = state.services.reservations.cancel(id).await?;
    Ok(Json(reservation))
}
