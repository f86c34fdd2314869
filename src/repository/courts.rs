//! Courts repository

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult, ErrorCode},
    models::court::Court,
};

#[derive(Clone)]
pub struct CourtsRepository {
    pool: Pool<Postgres>,
}

impl CourtsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List active courts of a center, ordered by name
    pub async fn list_by_center(&self, center_id: Uuid) -> AppResult<Vec<Court>> {
        let rows = sqlx::query_as::<_, Court>(
            "SELECT * FROM courts WHERE center_id = $1 AND active ORDER BY name",
        )
        .bind(center_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get a court by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Court> {
        sqlx::query_as::<_, Court>("SELECT * FROM courts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(ErrorCode::NoSuchCourt, format!("Court {} not found", id))
            })
    }
}
