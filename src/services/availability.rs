//! Court availability service
//!
//! Wires the reservation store to the pure slot computation: fetches the
//! center's operating-hours config and the day's active reservations, then
//! delegates to `scheduling::slots`.

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::{
    error::{AppError, AppResult},
    models::court::Court,
    repository::Repository,
    scheduling::{
        slots::{compute_slots, ReservedSpan},
        time::combine_date_and_time,
        OperatingHoursConfig, Slot,
    },
};

#[derive(Clone)]
pub struct AvailabilityService {
    repository: Repository,
}

impl AvailabilityService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Slot list for a court and date, loading court and center config
    pub async fn slots_for_day(&self, court: &Court, date: NaiveDate) -> AppResult<Vec<Slot>> {
        let center = self.repository.centers.get_by_id(court.center_id).await?;
        self.slots_with_config(court, &center.operating_hours, date).await
    }

    /// Slot list when the caller already holds the center config
    pub async fn slots_with_config(
        &self,
        court: &Court,
        config: &OperatingHoursConfig,
        date: NaiveDate,
    ) -> AppResult<Vec<Slot>> {
        let tz: Tz = config
            .timezone
            .parse()
            .map_err(|_| AppError::Validation(format!("Unknown timezone: {}", config.timezone)))?;

        // Fetch everything touching the center-local calendar day
        let day_start = combine_date_and_time(date, "00:00", tz)
            .ok_or_else(|| AppError::Internal(format!("Unrepresentable midnight on {}", date)))?;
        let next = date
            .succ_opt()
            .ok_or_else(|| AppError::Validation(format!("Date out of range: {}", date)))?;
        let day_end = combine_date_and_time(next, "00:00", tz)
            .ok_or_else(|| AppError::Internal(format!("Unrepresentable midnight on {}", next)))?;

        let reservations = self
            .repository
            .reservations
            .active_in_window(court.id, day_start, day_end)
            .await?;
        let spans: Vec<ReservedSpan> = reservations
            .iter()
            .filter(|r| r.status.blocks_availability())
            .map(|r| ReservedSpan { start: r.start_time, end: r.end_time })
            .collect();

        compute_slots(date, config, &spans)
    }
}
