//! Bookable-slot computation
//!
//! Slots are ephemeral: recomputed per request from the operating-hours
//! config and the reservations already on the books for one (court, date)
//! pair, never persisted.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    scheduling::{
        hours::{resolve_day_rule, OperatingHoursConfig},
        time::{combine_date_and_time, hhmm_to_minutes},
    },
};

/// A fixed-width bookable window for one court on one date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Slot {
    /// Slot start instant (UTC)
    pub start: DateTime<Utc>,
    /// Slot end instant (UTC, exclusive)
    pub end: DateTime<Utc>,
    pub available: bool,
}

/// The `[start, end)` span of an existing reservation, as consumed for
/// availability; status filtering happens before spans reach this module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservedSpan {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ReservedSpan {
    /// Half-open interval intersection; a reservation ending exactly where a
    /// slot starts does not block that slot.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start < self.end && self.start < end
    }
}

/// Compute the ordered slot list for one court and date.
///
/// The day rule's open windows are partitioned into consecutive
/// `slot_minutes`-wide buckets from each window's start; a trailing bucket
/// shorter than the granularity is dropped. A slot is unavailable when it
/// intersects any reserved span. The result is strictly ascending by start
/// with no overlapping slots.
pub fn compute_slots(
    date: NaiveDate,
    config: &OperatingHoursConfig,
    reservations: &[ReservedSpan],
) -> AppResult<Vec<Slot>> {
    let tz: Tz = config
        .timezone
        .parse()
        .map_err(|_| AppError::Validation(format!("Unknown timezone: {}", config.timezone)))?;

    let rule = resolve_day_rule(date, config);
    if !rule.is_open {
        return Ok(Vec::new());
    }

    let width = u32::from(config.slot_minutes);

    // Windows may come from an exception in arbitrary order; slot output is
    // contractually ascending.
    let mut windows: Vec<(u32, u32)> = rule
        .windows
        .iter()
        .filter_map(|w| Some((hhmm_to_minutes(&w.start)?, hhmm_to_minutes(&w.end)?)))
        .collect();
    windows.sort_unstable();

    let mut slots: Vec<Slot> = Vec::new();
    let mut last_end_minute = 0u32;
    for (open, close) in windows {
        let mut cursor = open.max(last_end_minute);
        while cursor + width <= close {
            let start = minute_to_instant(date, cursor, tz)?;
            let end = minute_to_instant(date, cursor + width, tz)?;
            cursor += width;
            // A spring-forward gap collapses wall-clock buckets inside it:
            // both ends roll to the same instant. Such a bucket is not a
            // bookable window and would break the ascending order.
            if end <= start {
                continue;
            }
            if let Some(prev) = slots.last() {
                if start < prev.end {
                    continue;
                }
            }
            let taken = reservations.iter().any(|r| r.overlaps(start, end));
            slots.push(Slot { start, end, available: !taken });
        }
        last_end_minute = last_end_minute.max(cursor);
    }

    Ok(slots)
}

fn minute_to_instant(date: NaiveDate, minute_of_day: u32, tz: Tz) -> AppResult<DateTime<Utc>> {
    let hhmm = format!("{:02}:{:02}", minute_of_day / 60, minute_of_day % 60);
    combine_date_and_time(date, &hhmm, tz)
        .ok_or_else(|| AppError::Internal(format!("Unrepresentable local time {}", hhmm)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BookingDefaults;
    use crate::scheduling::hours::{
        normalize_config, OperatingHoursInput, ScheduleException, TimeRange,
    };
    use chrono_tz::Europe::Madrid;

    fn config() -> OperatingHoursConfig {
        normalize_config(&OperatingHoursInput::default(), None, &BookingDefaults::default())
            .unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap() // a Monday
    }

    fn span(hhmm_start: &str, hhmm_end: &str) -> ReservedSpan {
        ReservedSpan {
            start: combine_date_and_time(date(), hhmm_start, Madrid).unwrap(),
            end: combine_date_and_time(date(), hhmm_end, Madrid).unwrap(),
        }
    }

    #[test]
    fn test_open_day_no_reservations_fully_available() {
        let slots = compute_slots(date(), &config(), &[]).unwrap();
        // 08:00..22:00 hourly
        assert_eq!(slots.len(), 14);
        assert!(slots.iter().all(|s| s.available));
    }

    #[test]
    fn test_slots_strictly_ascending_no_overlap() {
        let mut cfg = config();
        cfg.slot_minutes = 90;
        let slots = compute_slots(date(), &cfg, &[]).unwrap();
        for pair in slots.windows(2) {
            assert!(pair[0].start < pair[1].start);
            assert!(pair[0].end <= pair[1].start);
        }
        // Every slot is exactly the configured width
        for s in &slots {
            assert_eq!((s.end - s.start).num_minutes(), 90);
        }
    }

    #[test]
    fn test_trailing_partial_slot_dropped() {
        let mut cfg = config();
        cfg.slot_minutes = 45; // 14h window = 840 min -> 18 slots, 30 min remainder
        let slots = compute_slots(date(), &cfg, &[]).unwrap();
        assert_eq!(slots.len(), 18);
        let last = slots.last().unwrap();
        assert_eq!((last.end - last.start).num_minutes(), 45);
    }

    #[test]
    fn test_spring_forward_gap_yields_no_collapsed_slot() {
        // Madrid springs forward on 2025-03-30; 02:00-03:00 does not exist
        let gap_day = NaiveDate::from_ymd_opt(2025, 3, 30).unwrap();
        let mut cfg = config();
        cfg.exceptions.push(ScheduleException {
            date: gap_day,
            closed: false,
            ranges: Some(vec![TimeRange { start: "01:00".into(), end: "04:00".into() }]),
        });
        let slots = compute_slots(gap_day, &cfg, &[]).unwrap();
        // The 02:00 bucket falls entirely inside the gap and is skipped
        assert_eq!(slots.len(), 2);
        for s in &slots {
            assert_eq!((s.end - s.start).num_minutes(), 60);
        }
        for pair in slots.windows(2) {
            assert!(pair[0].start < pair[1].start);
            assert!(pair[0].end <= pair[1].start);
        }
    }

    #[test]
    fn test_closed_exception_beats_open_weekday() {
        let mut cfg = config();
        cfg.exceptions.push(ScheduleException { date: date(), closed: true, ranges: None });
        assert!(compute_slots(date(), &cfg, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_exception_ranges_partition_independently() {
        let mut cfg = config();
        cfg.exceptions.push(ScheduleException {
            date: date(),
            closed: false,
            ranges: Some(vec![
                TimeRange { start: "16:00".into(), end: "18:30".into() }, // 2 slots + remainder
                TimeRange { start: "09:00".into(), end: "11:00".into() }, // unordered on purpose
            ]),
        });
        let slots = compute_slots(date(), &cfg, &[]).unwrap();
        let starts: Vec<String> = slots
            .iter()
            .map(|s| s.start.with_timezone(&Madrid).format("%H:%M").to_string())
            .collect();
        assert_eq!(starts, vec!["09:00", "10:00", "16:00", "17:00"]);
    }

    #[test]
    fn test_reservation_blocks_overlapping_slot_only() {
        let slots = compute_slots(date(), &config(), &[span("10:00", "11:00")]).unwrap();
        let by_start = |hhmm: &str| {
            slots
                .iter()
                .find(|s| s.start.with_timezone(&Madrid).format("%H:%M").to_string() == hhmm)
                .unwrap()
        };
        assert!(!by_start("10:00").available);
        // Half-open boundary: end == next slot start leaves it bookable
        assert!(by_start("11:00").available);
        assert!(by_start("09:00").available);
    }

    #[test]
    fn test_partial_intersection_blocks_slot() {
        // Reservation straddling two hourly slots blocks both
        let slots = compute_slots(date(), &config(), &[span("10:30", "11:30")]).unwrap();
        let unavailable: Vec<String> = slots
            .iter()
            .filter(|s| !s.available)
            .map(|s| s.start.with_timezone(&Madrid).format("%H:%M").to_string())
            .collect();
        assert_eq!(unavailable, vec!["10:00", "11:00"]);
    }
}
