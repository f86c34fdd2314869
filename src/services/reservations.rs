//! Reservation service: creation, cancellation and conflict alternatives

use chrono::{Duration, NaiveDate};
use chrono_tz::Tz;

use crate::{
    error::{AppError, AppResult},
    models::reservation::{CreateReservation, Reservation},
    repository::Repository,
    scheduling::{
        suggest::{rank_alternatives, Suggestion},
        time::{hhmm_to_minutes, normalize_to_hhmm},
    },
    services::{
        availability::AvailabilityService, gateway::PaymentGateway, pricing::PricingService,
    },
};

/// Result of a create attempt: either the stored reservation or a conflict
/// with ranked alternatives for the operator to offer
pub enum CreateOutcome {
    Created(Reservation),
    Conflict { message: String, suggestions: Vec<Suggestion> },
}

#[derive(Clone)]
pub struct ReservationsService {
    repository: Repository,
    availability: AvailabilityService,
    pricing: PricingService,
    gateway: PaymentGateway,
}

impl ReservationsService {
    pub fn new(
        repository: Repository,
        availability: AvailabilityService,
        pricing: PricingService,
        gateway: PaymentGateway,
    ) -> Self {
        Self { repository, availability, pricing, gateway }
    }

    pub async fn get(&self, id: uuid::Uuid) -> AppResult<Reservation> {
        self.repository.reservations.get_by_id(id).await
    }

    /// Create a reservation.
    ///
    /// Prices the booking server-side, applies a validated override, then
    /// checks for an overlapping active reservation; an overlap is reported
    /// as a conflict (409) so the caller can offer alternatives instead of a
    /// bare failure. A failed payment capture cancels the just-created
    /// reservation before the error is returned, so the slot is freed.
    pub async fn create(&self, data: CreateReservation) -> AppResult<Reservation> {
        let court = self.repository.courts.get_by_id(data.court_id).await?;
        let center = self.repository.centers.get_by_id(court.center_id).await?;
        let end_time = data.start_time + Duration::minutes(i64::from(data.duration));

        let breakdown = self
            .pricing
            .price_booking(
                &court,
                &center.operating_hours,
                center.taxes.as_ref(),
                data.start_time,
                data.duration,
            )
            .await?;

        let mut total = breakdown.final_total;
        if let Some(pricing_override) = &data.pricing_override {
            let check = self.pricing.validate_override(pricing_override.amount, total);
            if !check.is_valid {
                return Err(AppError::OverrideRejected(
                    check.error.unwrap_or_else(|| "Override out of bounds".to_string()),
                ));
            }
            total += pricing_override.amount;
        }

        if let Some(existing) = self
            .repository
            .reservations
            .find_overlapping(court.id, data.start_time, end_time)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Court already reserved from {} to {}",
                existing.start_time, existing.end_time
            )));
        }

        let reservation =
            self.repository.reservations.create(&data, end_time, Some(total)).await?;

        if let Some(payment) = &data.payment {
            let amount = payment.amount.unwrap_or(total);
            if let Err(gateway_err) = self.gateway.capture(reservation.id, amount, payment).await {
                // A reservation whose charge failed must not stay on the
                // books blocking the slot
                if let Err(cancel_err) =
                    self.repository.reservations.cancel(reservation.id).await
                {
                    tracing::error!(
                        reservation = %reservation.id,
                        "Could not cancel reservation after failed capture: {}",
                        cancel_err
                    );
                }
                return Err(gateway_err);
            }
        }

        if data.send_notifications {
            // Delivery is handled by the notification system; we only record
            // that it was requested.
            tracing::info!(reservation = %reservation.id, "Confirmation notification requested");
        }

        tracing::info!(
            reservation = %reservation.id,
            court = %court.id,
            start = %reservation.start_time,
            "Reservation created"
        );
        Ok(reservation)
    }

    /// Create a reservation, turning a scheduling conflict into a ranked
    /// suggestion list instead of an error
    pub async fn create_with_alternatives(
        &self,
        data: CreateReservation,
    ) -> AppResult<CreateOutcome> {
        let court_id = data.court_id;
        let start_time = data.start_time;
        let duration = data.duration;

        match self.create(data).await {
            Ok(reservation) => Ok(CreateOutcome::Created(reservation)),
            Err(AppError::Conflict(message)) => {
                // Express the requested instant in the center's zone so the
                // proximity ranking works on the operator's wall clock
                let court = self.repository.courts.get_by_id(court_id).await?;
                let center = self.repository.centers.get_by_id(court.center_id).await?;
                let tz: Tz = center.operating_hours.timezone.parse().map_err(|_| {
                    AppError::Validation(format!(
                        "Unknown timezone: {}",
                        center.operating_hours.timezone
                    ))
                })?;
                let local = start_time.with_timezone(&tz);
                let date = local.date_naive();
                let requested_time = local.format("%H:%M").to_string();

                let suggestions = self
                    .suggest_alternatives(court_id, date, &requested_time, duration)
                    .await?;
                Ok(CreateOutcome::Conflict { message, suggestions })
            }
            Err(e) => Err(e),
        }
    }

    pub async fn cancel(&self, id: uuid::Uuid) -> AppResult<Reservation> {
        let reservation = self.repository.reservations.cancel(id).await?;
        tracing::info!(reservation = %id, "Reservation cancelled");
        Ok(reservation)
    }

    /// Alternative slots after a booking conflict.
    ///
    /// Looks at the requested date first; when it has no open slot at all,
    /// rolls forward exactly one calendar day and retries once. Open slots
    /// are ranked by minute-of-day distance to the requested time and the
    /// closest eight are priced. A suggestion whose pricing fails is still
    /// returned, without a price.
    pub async fn suggest_alternatives(
        &self,
        court_id: uuid::Uuid,
        date: NaiveDate,
        requested_time: &str,
        duration_minutes: u32,
    ) -> AppResult<Vec<Suggestion>> {
        let requested_hhmm = normalize_to_hhmm(requested_time).ok_or_else(|| {
            AppError::TimeFormat(format!("Cannot parse requested time '{}'", requested_time))
        })?;
        let requested_minute = hhmm_to_minutes(&requested_hhmm)
            .ok_or_else(|| AppError::TimeFormat(format!("Invalid time '{}'", requested_hhmm)))?;

        let court = self.repository.courts.get_by_id(court_id).await?;
        let center = self.repository.centers.get_by_id(court.center_id).await?;
        let config = &center.operating_hours;
        let tz: Tz = config
            .timezone
            .parse()
            .map_err(|_| AppError::Validation(format!("Unknown timezone: {}", config.timezone)))?;

        let mut slots = self.availability.slots_with_config(&court, config, date).await?;
        if !slots.iter().any(|s| s.available) {
            // Bounded rollover: exactly one extra day, never an open scan
            let next = date
                .succ_opt()
                .ok_or_else(|| AppError::Validation(format!("Date out of range: {}", date)))?;
            slots = self.availability.slots_with_config(&court, config, next).await?;
        }

        let mut suggestions = rank_alternatives(&slots, requested_minute, tz);
        for suggestion in &mut suggestions {
            match self.pricing.calculate_local(
                &court,
                config,
                center.taxes.as_ref(),
                suggestion.start,
                duration_minutes,
            ) {
                Ok(breakdown) => suggestion.price = Some(breakdown),
                Err(e) => {
                    // The slot is still offered, just without an estimate
                    tracing::warn!(
                        court = %court.id,
                        start = %suggestion.start,
                        "Could not price suggestion: {}",
                        e
                    );
                }
            }
        }

        tracing::debug!(court = %court.id, count = suggestions.len(), "Conflict alternatives computed");
        Ok(suggestions)
    }
}
