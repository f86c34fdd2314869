//! Alternative-slot ranking after a booking conflict
//!
//! The pure half of conflict resolution: given the slot list for a date and
//! the originally requested time-of-day, pick the open slots closest in time.
//! Fetching slots and pricing the picks happens in the reservations service.

use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use utoipa::ToSchema;

use crate::scheduling::{pricing::PriceBreakdown, slots::Slot};

/// Maximum number of alternatives offered after a conflict
pub const MAX_SUGGESTIONS: usize = 8;

/// One ranked alternative; `price` is absent when pricing that single
/// suggestion failed, which never removes the suggestion itself.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// Slot start instant (UTC)
    pub start: DateTime<Utc>,
    /// Slot end instant (UTC, exclusive)
    pub end: DateTime<Utc>,
    /// Absolute distance to the requested time-of-day, in minutes
    pub distance_minutes: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceBreakdown>,
}

/// Rank the available slots by absolute minute-of-day distance to the
/// requested time, closest first, capped at [`MAX_SUGGESTIONS`].
///
/// The sort is stable, so among equally distant slots the earlier one keeps
/// its chronological position. The returned order is a user-facing contract
/// and must reach the UI unchanged.
pub fn rank_alternatives(slots: &[Slot], requested_minute_of_day: u32, tz: Tz) -> Vec<Suggestion> {
    let mut ranked: Vec<Suggestion> = slots
        .iter()
        .filter(|s| s.available)
        .map(|s| Suggestion {
            start: s.start,
            end: s.end,
            distance_minutes: distance(s.start, requested_minute_of_day, tz),
            price: None,
        })
        .collect();

    ranked.sort_by_key(|s| s.distance_minutes);
    ranked.truncate(MAX_SUGGESTIONS);
    ranked
}

fn distance(start: DateTime<Utc>, requested_minute_of_day: u32, tz: Tz) -> u32 {
    let local = start.with_timezone(&tz);
    let slot_minute = local.hour() * 60 + local.minute();
    slot_minute.abs_diff(requested_minute_of_day)
}
