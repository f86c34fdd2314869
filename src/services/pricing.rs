//! Pricing service
//!
//! Prices are computed locally by the pricing engine unless a remote pricing
//! source is configured, in which case its response is read defensively
//! across the field synonyms that API emits.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::{
    config::{BookingDefaults, PricingSourceConfig},
    error::{AppError, AppResult},
    models::court::Court,
    repository::Repository,
    scheduling::{
        pricing::{calculate, validate_price_override, OverrideValidation, QuoteFields},
        OperatingHoursConfig, PriceBreakdown, TaxConfig,
    },
};

#[derive(Clone)]
pub struct PricingService {
    repository: Repository,
    defaults: BookingDefaults,
    remote: Option<RemoteQuoteSource>,
}

impl PricingService {
    pub fn new(
        repository: Repository,
        defaults: BookingDefaults,
        source: &PricingSourceConfig,
    ) -> AppResult<Self> {
        let remote = match &source.remote_url {
            Some(url) => Some(RemoteQuoteSource::new(url.clone(), source.timeout_secs)?),
            None => None,
        };
        Ok(Self { repository, defaults, remote })
    }

    /// Price a booking, loading court and center configuration
    pub async fn calculate_for_court(
        &self,
        court_id: Uuid,
        start: DateTime<Utc>,
        duration_minutes: u32,
    ) -> AppResult<PriceBreakdown> {
        let court = self.repository.courts.get_by_id(court_id).await?;
        let center = self.repository.centers.get_by_id(court.center_id).await?;
        self.price_booking(
            &court,
            &center.operating_hours,
            center.taxes.as_ref(),
            start,
            duration_minutes,
        )
        .await
    }

    /// Price a booking when court and center config are already loaded
    pub async fn price_booking(
        &self,
        court: &Court,
        config: &OperatingHoursConfig,
        taxes: Option<&TaxConfig>,
        start: DateTime<Utc>,
        duration_minutes: u32,
    ) -> AppResult<PriceBreakdown> {
        if let Some(remote) = &self.remote {
            return remote.quote(court.id, start, duration_minutes).await;
        }
        self.calculate_local(court, config, taxes, start, duration_minutes)
    }

    /// Local pricing only; used for suggestion estimates where a remote
    /// failure must degrade per-suggestion rather than abort the batch
    pub fn calculate_local(
        &self,
        court: &Court,
        config: &OperatingHoursConfig,
        taxes: Option<&TaxConfig>,
        start: DateTime<Utc>,
        duration_minutes: u32,
    ) -> AppResult<PriceBreakdown> {
        calculate(&court.rates(), start, duration_minutes, config, taxes)
    }

    /// Bounds check for a manual override against a computed total
    pub fn validate_override(&self, delta: Decimal, base_total: Decimal) -> OverrideValidation {
        validate_price_override(delta, base_total, self.defaults.max_override_percent)
    }
}

/// Client for the external pricing API
#[derive(Clone)]
struct RemoteQuoteSource {
    client: reqwest::Client,
    url: String,
}

/// Envelope the external pricing API wraps its fields in
#[derive(Debug, Deserialize)]
struct RemoteQuoteResponse {
    pricing: QuoteFields,
}

impl RemoteQuoteSource {
    fn new(url: String, timeout_secs: u64) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, url })
    }

    async fn quote(
        &self,
        court_id: Uuid,
        start: DateTime<Utc>,
        duration_minutes: u32,
    ) -> AppResult<PriceBreakdown> {
        let response = self
            .client
            .post(&self.url)
            .json(&json!({
                "courtId": court_id,
                "startTime": start,
                "duration": duration_minutes,
            }))
            .send()
            .await
            .map_err(|e| AppError::PricingUnavailable(format!("Pricing source unreachable: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::PricingUnavailable(format!(
                "Pricing source returned {}",
                response.status()
            )));
        }

        let body: RemoteQuoteResponse = response
            .json()
            .await
            .map_err(|e| AppError::PricingUnavailable(format!("Unreadable pricing response: {}", e)))?;

        // A response without any recognized total is a recoverable
        // "could not price" state, not a hard failure
        let final_total = body.pricing.final_total().ok_or_else(|| {
            AppError::PricingUnavailable("Pricing source returned no usable total".to_string())
        })?;

        Ok(PriceBreakdown {
            base_amount: body.pricing.base_amount().unwrap_or(final_total),
            line_items: body.pricing.breakdown.clone(),
            tax_rate: body.pricing.tax_rate,
            tax_amount: body.pricing.tax_amount,
            final_total,
        })
    }
}
