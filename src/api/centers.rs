//! Center API endpoints (listing, settings)

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::center::{Center, CenterSettings, UpdateCenterSettings},
};

/// List centers
#[utoipa::path(
    get,
    path = "/centers",
    tag = "centers",
    responses(
        (status = 200, description = "Centers list", body = Vec<Center>)
    )
)]
pub async fn list_centers(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Center>>> {
    let centers = state.services.centers.list().await?;
    Ok(Json(centers))
}

/// Get a center
#[utoipa::path(
    get,
    path = "/centers/{id}",
    tag = "centers",
    params(("id" = Uuid, Path, description = "Center ID")),
    responses(
        (status = 200, description = "Center", body = Center),
        (status = 404, description = "Center not found")
    )
)]
pub async fn get_center(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Center>> {
    let center = state.services.centers.get(id).await?;
    Ok(Json(center))
}

/// Get a center's operating-hours and tax settings
#[utoipa::path(
    get,
    path = "/centers/{id}/settings",
    tag = "centers",
    params(("id" = Uuid, Path, description = "Center ID")),
    responses(
        (status = 200, description = "Center settings", body = CenterSettings)
    )
)]
pub async fn get_settings(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<CenterSettings>> {
    let settings = state.services.centers.get_settings(id).await?;
    Ok(Json(settings))
}

/// Update a center's settings.
///
/// Accepts a partial update; days or fields not submitted keep their stored
/// values and the saved config is always complete and canonical.
#[utoipa::path(
    put,
    path = "/centers/{id}/settings",
    tag = "centers",
    params(("id" = Uuid, Path, description = "Center ID")),
    request_body = UpdateCenterSettings,
    responses(
        (status = 200, description = "Settings updated", body = CenterSettings),
        (status = 400, description = "Invalid time format or schedule")
    )
)]
pub async fn update_settings(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<UpdateCenterSettings>,
) -> AppResult<Json<CenterSettings>> {
    let settings = state.services.centers.update_settings(id, update).await?;
    Ok(Json(settings))
}
