//! Centers repository

use chrono::Utc;
use sqlx::{types::Json, Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult, ErrorCode},
    models::center::Center,
    scheduling::{OperatingHoursConfig, TaxConfig},
};

#[derive(Clone)]
pub struct CentersRepository {
    pool: Pool<Postgres>,
}

impl CentersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all centers
    pub async fn list(&self) -> AppResult<Vec<Center>> {
        let rows = sqlx::query(
            "SELECT id, name, address, operating_hours, taxes, crea_date, modif_date \
             FROM centers ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(map_center).collect()
    }

    /// Get a center by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Center> {
        let row = sqlx::query(
            "SELECT id, name, address, operating_hours, taxes, crea_date, modif_date \
             FROM centers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(ErrorCode::NoSuchCenter, format!("Center {} not found", id))
        })?;

        map_center(row)
    }

    /// Replace a center's operating-hours config and tax settings.
    ///
    /// The config is written whole; readers only ever observe a complete
    /// value, never a partially applied update.
    pub async fn replace_settings(
        &self,
        id: Uuid,
        operating_hours: &OperatingHoursConfig,
        taxes: Option<&TaxConfig>,
    ) -> AppResult<Center> {
        let row = sqlx::query(
            r#"
            UPDATE centers
            SET operating_hours = $2, taxes = $3, modif_date = $4
            WHERE id = $1
            RETURNING id, name, address, operating_hours, taxes, crea_date, modif_date
            "#,
        )
        .bind(id)
        .bind(Json(operating_hours))
        .bind(taxes.map(Json))
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(ErrorCode::NoSuchCenter, format!("Center {} not found", id))
        })?;

        map_center(row)
    }
}

fn map_center(row: sqlx::postgres::PgRow) -> AppResult<Center> {
    let operating_hours: Json<OperatingHoursConfig> = row.try_get("operating_hours")?;
    let taxes: Option<Json<TaxConfig>> = row.try_get("taxes")?;
    Ok(Center {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        address: row.try_get("address")?,
        operating_hours: operating_hours.0,
        taxes: taxes.map(|t| t.0),
        crea_date: row.try_get("crea_date")?,
        modif_date: row.try_get("modif_date")?,
    })
}
