//! Repository layer for database operations

pub mod centers;
pub mod courts;
pub mod reservations;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub centers: centers::CentersRepository,
    pub courts: courts::CourtsRepository,
    pub reservations: reservations::ReservationsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            centers: centers::CentersRepository::new(pool.clone()),
            courts: courts::CourtsRepository::new(pool.clone()),
            reservations: reservations::ReservationsRepository::new(pool.clone()),
            pool,
        }
    }
}
