//! API handlers for Cancha REST endpoints

pub mod availability;
pub mod centers;
pub mod courts;
pub mod health;
pub mod openapi;
pub mod pricing;
pub mod reservations;

use validator::Validate;

use crate::error::{AppError, AppResult};

/// Run validator-derive rules on a request body, mapping the first failure
/// into a field-level validation error
pub fn validate_body<T: Validate>(body: &T) -> AppResult<()> {
    body.validate().map_err(|e| AppError::Validation(e.to_string()))
}
