//! Reservations repository

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult, ErrorCode},
    models::reservation::{CreateReservation, Reservation, ReservationStatus},
};

#[derive(Clone)]
pub struct ReservationsRepository {
    pool: Pool<Postgres>,
}

impl ReservationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get a reservation by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(
                    ErrorCode::NoSuchReservation,
                    format!("Reservation {} not found", id),
                )
            })
    }

    /// Active (non-cancelled) reservations of a court intersecting a window,
    /// half-open `[from, to)`, ordered by start
    pub async fn active_in_window(
        &self,
        court_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<Reservation>> {
        let rows = sqlx::query_as::<_, Reservation>(
            r#"
            SELECT * FROM reservations
            WHERE court_id = $1
              AND status <> 'cancelled'
              AND start_time < $3
              AND end_time > $2
            ORDER BY start_time
            "#,
        )
        .bind(court_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// First active reservation overlapping `[start, end)`, if any
    pub async fn find_overlapping(
        &self,
        court_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Option<Reservation>> {
        let row = sqlx::query_as::<_, Reservation>(
            r#"
            SELECT * FROM reservations
            WHERE court_id = $1
              AND status <> 'cancelled'
              AND start_time < $3
              AND end_time > $2
            ORDER BY start_time
            LIMIT 1
            "#,
        )
        .bind(court_id)
        .bind(start)
        .bind(end)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Insert a confirmed reservation
    pub async fn create(
        &self,
        data: &CreateReservation,
        end_time: DateTime<Utc>,
        total_price: Option<Decimal>,
    ) -> AppResult<Reservation> {
        let (override_amount, override_reason) = match &data.pricing_override {
            Some(o) => (Some(o.amount), Some(o.reason.clone())),
            None => (None, None),
        };

        let row = sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO reservations
                (id, court_id, user_id, start_time, end_time, status,
                 total_price, override_amount, override_reason, notes, crea_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.court_id)
        .bind(data.user_id)
        .bind(data.start_time)
        .bind(end_time)
        .bind(ReservationStatus::Confirmed)
        .bind(total_price)
        .bind(override_amount)
        .bind(override_reason)
        .bind(&data.notes)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Mark a reservation cancelled; cancelled reservations no longer block
    /// availability
    pub async fn cancel(&self, id: Uuid) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>(
            r#"
            UPDATE reservations
            SET status = 'cancelled', modif_date = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(
                ErrorCode::NoSuchReservation,
                format!("Reservation {} not found", id),
            )
        })
    }
}
