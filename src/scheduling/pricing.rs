//! Reservation pricing
//!
//! All money arithmetic runs on `rust_decimal::Decimal`; amounts are rounded
//! to two decimals only when a breakdown is assembled for presentation, never
//! mid-calculation.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    scheduling::{
        hours::{classify_segment, OperatingHoursConfig, Segment},
        time::instant_to_hhmm,
    },
};

/// Line-item description for the night lighting surcharge
pub const LIGHTING_LINE_ITEM: &str = "Iluminación nocturna";

/// Rate inputs read from a court record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourtRates {
    pub hourly_rate: Decimal,
    pub has_lighting: bool,
    pub lighting_extra_per_hour: Option<Decimal>,
}

/// Center tax configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TaxConfig {
    /// Tax rate in percent
    pub rate: Decimal,
    /// When true the rate is already inside the court's hourly rate and is
    /// reported only informationally
    pub included: bool,
}

/// One itemized surcharge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LineItem {
    pub description: String,
    pub amount: Decimal,
}

/// Computed price breakdown; ephemeral, recomputed on every input change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub base_amount: Decimal,
    pub line_items: Vec<LineItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_amount: Option<Decimal>,
    pub final_total: Decimal,
}

fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Compute the price for a court booking starting at `start` and lasting
/// `duration_minutes`.
///
/// Base amount is `hourly_rate * minutes / 60`. Courts with lighting add the
/// night surcharge when the start time falls in the night segment of the
/// center's watersheds; a day booking carries no lighting line item at all.
/// An excluded tax is added to the total; an included tax is back-computed
/// and reported without being added again.
pub fn calculate(
    rates: &CourtRates,
    start: DateTime<Utc>,
    duration_minutes: u32,
    config: &OperatingHoursConfig,
    tax: Option<&TaxConfig>,
) -> AppResult<PriceBreakdown> {
    if duration_minutes == 0 {
        return Err(AppError::Validation("Duration must be positive".to_string()));
    }
    let tz: Tz = config
        .timezone
        .parse()
        .map_err(|_| AppError::Validation(format!("Unknown timezone: {}", config.timezone)))?;

    let hours = Decimal::from(duration_minutes) / Decimal::from(60);
    let base_amount = rates.hourly_rate * hours;

    let mut line_items = Vec::new();
    let start_hhmm = instant_to_hhmm(start, tz);
    if rates.has_lighting && classify_segment(&start_hhmm, config) == Segment::Night {
        if let Some(extra) = rates.lighting_extra_per_hour.filter(|e| !e.is_zero()) {
            line_items.push((LIGHTING_LINE_ITEM.to_string(), extra * hours));
        }
    }

    let subtotal = base_amount + line_items.iter().map(|(_, a)| *a).sum::<Decimal>();

    let (tax_rate, tax_amount, final_total) = match tax {
        Some(tax) if !tax.included => {
            let amount = subtotal * tax.rate / Decimal::from(100);
            (Some(tax.rate), Some(amount), subtotal + amount)
        }
        Some(tax) => {
            // Informational only: the rate is already inside the subtotal
            let amount = subtotal * tax.rate / (Decimal::from(100) + tax.rate);
            (Some(tax.rate), Some(amount), subtotal)
        }
        None => (None, None, subtotal),
    };

    Ok(PriceBreakdown {
        base_amount: round_money(base_amount),
        line_items: line_items
            .into_iter()
            .map(|(description, amount)| LineItem { description, amount: round_money(amount) })
            .collect(),
        tax_rate,
        tax_amount: tax_amount.map(round_money),
        final_total: round_money(final_total),
    })
}

// ---------------------------------------------------------------------------
// Manual override
// ---------------------------------------------------------------------------

/// Outcome of an override bounds check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverrideValidation {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OverrideValidation {
    fn ok() -> Self {
        Self { is_valid: true, error: None }
    }

    fn rejected(error: String) -> Self {
        Self { is_valid: false, error: Some(error) }
    }
}

/// Bounds check for a manual price override delta.
///
/// The delta is signed and bounded by `max_override_percent` of the computed
/// final total. This is a pure bounds check; the reason-length rule is
/// enforced by the request validator before a reservation is created.
pub fn validate_price_override(
    delta_amount: Decimal,
    base_total: Decimal,
    max_override_percent: u32,
) -> OverrideValidation {
    if delta_amount.is_zero() {
        return OverrideValidation::ok();
    }
    if base_total <= Decimal::ZERO {
        return OverrideValidation::rejected(
            "Cannot override a price that has not been computed".to_string(),
        );
    }
    let limit = base_total * Decimal::from(max_override_percent) / Decimal::from(100);
    if delta_amount.abs() > limit {
        return OverrideValidation::rejected(format!(
            "Override exceeds {}% of the computed total (limit {})",
            max_override_percent,
            round_money(limit)
        ));
    }
    OverrideValidation::ok()
}

// ---------------------------------------------------------------------------
// External quote adapter
// ---------------------------------------------------------------------------

/// Pricing fields as returned by the external pricing API, which tolerates
/// several field-name synonyms for the base and final amounts.
///
/// Synonym priority is fixed and documented here, isolated from the rest of
/// the engine: final total reads `finalPrice`, then `total`, then
/// `totalPrice`; base reads `basePrice`, then `base`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteFields {
    pub final_price: Option<Decimal>,
    pub total: Option<Decimal>,
    pub total_price: Option<Decimal>,
    pub base_price: Option<Decimal>,
    pub base: Option<Decimal>,
    #[serde(default)]
    pub breakdown: Vec<LineItem>,
    pub tax_rate: Option<Decimal>,
    pub tax_amount: Option<Decimal>,
}

impl QuoteFields {
    /// Final total under the documented synonym priority; `None` means the
    /// quote carries no usable total and the caller must surface a
    /// recoverable "could not price" state.
    pub fn final_total(&self) -> Option<Decimal> {
        self.final_price.or(self.total).or(self.total_price)
    }

    pub fn base_amount(&self) -> Option<Decimal> {
        self.base_price.or(self.base)
    }
}
