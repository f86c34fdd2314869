//! Court API endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::{error::AppResult, models::court::Court};

/// List active courts of a center
#[utoipa::path(
    get,
    path = "/centers/{id}/courts",
    tag = "courts",
    params(("id" = Uuid, Path, description = "Center ID")),
    responses(
        (status = 200, description = "Courts list", body = Vec<Court>)
    )
)]
pub async fn list_courts(
    State(state): State<crate::AppState>,
    Path(center_id): Path<Uuid>,
) -> AppResult<Json<Vec<Court>>> {
    let courts = state.services.courts.list_by_center(center_id).await?;
    Ok(Json(courts))
}

/// Get a court
#[utoipa::path(
    get,
    path = "/courts/{id}",
    tag = "courts",
    params(("id" = Uuid, Path, description = "Court ID")),
    responses(
        (status = 200, description = "Court", body = Court),
        (status = 404, description = "Court not found")
    )
)]
pub async fn get_court(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Court>> {
    let court = state.services.courts.get(id).await?;
    Ok(Json(court))
}
