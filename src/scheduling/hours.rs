//! Operating-hours model for a center
//!
//! A center's bookable time is described by a weekly schedule (open/close per
//! weekday), date-keyed exceptions that fully override the weekday rule, a
//! slot granularity and two watershed times splitting the day into "day" and
//! "night" pricing segments.

use chrono::{Datelike, NaiveDate, Weekday};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    config::BookingDefaults,
    error::{AppError, AppResult},
    scheduling::time::{hhmm_to_minutes, normalize_to_hhmm},
};

/// Open/close rule for one weekday
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DayHours {
    /// Opening time (HH:mm)
    pub open: String,
    /// Closing time (HH:mm)
    pub close: String,
    /// When true the day is not bookable; open/close are kept for display
    pub closed: bool,
}

/// Weekly schedule; all seven days are always present
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WeeklySchedule {
    pub monday: DayHours,
    pub tuesday: DayHours,
    pub wednesday: DayHours,
    pub thursday: DayHours,
    pub friday: DayHours,
    pub saturday: DayHours,
    pub sunday: DayHours,
}

impl WeeklySchedule {
    pub fn day(&self, weekday: Weekday) -> &DayHours {
        match weekday {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }
}

/// An open window within a day, half-open `[start, end)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TimeRange {
    /// Window start (HH:mm)
    pub start: String,
    /// Window end (HH:mm, exclusive)
    pub end: String,
}

/// A date-specific override of the weekly schedule.
///
/// An exception replaces the weekday rule entirely: `closed` wins over any
/// `ranges`, and `ranges` open exactly those windows even on a weekday whose
/// base rule is closed.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScheduleException {
    /// Date this exception applies to
    pub date: NaiveDate,
    /// Full-day closure
    #[serde(default)]
    pub closed: bool,
    /// Open windows for the date, when not fully closed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranges: Option<Vec<TimeRange>>,
}

/// Per-center operating-hours configuration.
///
/// Treated as an immutable value: every settings update produces a fresh
/// config via [`normalize_config`], never an in-place mutation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OperatingHoursConfig {
    pub weekly_schedule: WeeklySchedule,
    /// Unique by date; a later entry for the same date replaces the earlier
    pub exceptions: Vec<ScheduleException>,
    /// Slot granularity in minutes (5..=240)
    pub slot_minutes: u16,
    /// IANA timezone of the center
    pub timezone: String,
    /// Start of the "day" pricing segment (HH:mm)
    pub day_start: String,
    /// Start of the "night" pricing segment (HH:mm)
    pub night_start: String,
}

/// Resolved rule for one calendar date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayRule {
    pub is_open: bool,
    /// Open windows, in the order configured; empty when closed
    pub windows: Vec<TimeRange>,
}

impl DayRule {
    fn closed() -> Self {
        Self { is_open: false, windows: Vec::new() }
    }
}

/// Day/night pricing segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Segment {
    Day,
    Night,
}

/// Resolve the operating rule for a date: an exact-date exception overrides
/// the weekday rule entirely; otherwise the weekly schedule applies.
pub fn resolve_day_rule(date: NaiveDate, config: &OperatingHoursConfig) -> DayRule {
    // Last write wins when the same date was recorded twice
    if let Some(exception) = config.exceptions.iter().rev().find(|e| e.date == date) {
        if exception.closed {
            return DayRule::closed();
        }
        let windows: Vec<TimeRange> = exception
            .ranges
            .iter()
            .flatten()
            .filter(|r| valid_window(r))
            .cloned()
            .collect();
        if windows.is_empty() {
            return DayRule::closed();
        }
        return DayRule { is_open: true, windows };
    }

    let day = config.weekly_schedule.day(date.weekday());
    if day.closed {
        return DayRule::closed();
    }
    let window = TimeRange { start: day.open.clone(), end: day.close.clone() };
    if !valid_window(&window) {
        return DayRule::closed();
    }
    DayRule { is_open: true, windows: vec![window] }
}

fn valid_window(range: &TimeRange) -> bool {
    match (hhmm_to_minutes(&range.start), hhmm_to_minutes(&range.end)) {
        (Some(start), Some(end)) => start < end,
        _ => false,
    }
}

/// Classify a time-of-day against the configured watersheds.
///
/// `day_start <= t < night_start` is day; everything else is night. The
/// night segment drives the lighting surcharge.
pub fn classify_segment(hhmm: &str, config: &OperatingHoursConfig) -> Segment {
    let (Some(t), Some(day), Some(night)) = (
        hhmm_to_minutes(hhmm),
        hhmm_to_minutes(&config.day_start),
        hhmm_to_minutes(&config.night_start),
    ) else {
        return Segment::Night;
    };
    if t >= day && t < night {
        Segment::Day
    } else {
        Segment::Night
    }
}

// ---------------------------------------------------------------------------
// Settings normalization
// ---------------------------------------------------------------------------

/// Loose per-day input from the settings form; times in any accepted format
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct DayHoursInput {
    pub open: Option<String>,
    pub close: Option<String>,
    pub closed: Option<bool>,
}

/// Loose weekly schedule input; any subset of days may be present
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct WeeklyScheduleInput {
    pub monday: Option<DayHoursInput>,
    pub tuesday: Option<DayHoursInput>,
    pub wednesday: Option<DayHoursInput>,
    pub thursday: Option<DayHoursInput>,
    pub friday: Option<DayHoursInput>,
    pub saturday: Option<DayHoursInput>,
    pub sunday: Option<DayHoursInput>,
}

impl WeeklyScheduleInput {
    fn day(&self, weekday: Weekday) -> Option<&DayHoursInput> {
        match weekday {
            Weekday::Mon => self.monday.as_ref(),
            Weekday::Tue => self.tuesday.as_ref(),
            Weekday::Wed => self.wednesday.as_ref(),
            Weekday::Thu => self.thursday.as_ref(),
            Weekday::Fri => self.friday.as_ref(),
            Weekday::Sat => self.saturday.as_ref(),
            Weekday::Sun => self.sunday.as_ref(),
        }
    }
}

/// Partial settings update from the admin form
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OperatingHoursInput {
    pub weekly_schedule: Option<WeeklyScheduleInput>,
    pub exceptions: Option<Vec<ScheduleException>>,
    pub slot_minutes: Option<u16>,
    pub timezone: Option<String>,
    pub day_start: Option<String>,
    pub night_start: Option<String>,
}

/// Build a complete config from a partial update.
///
/// Missing fields fall back to `previous`, then to the injected defaults.
/// All seven weekdays are always present in the result and every time field
/// has passed through the normalizer; a field that fails to parse is an
/// error, never a silent substitution.
pub fn normalize_config(
    partial: &OperatingHoursInput,
    previous: Option<&OperatingHoursConfig>,
    defaults: &BookingDefaults,
) -> AppResult<OperatingHoursConfig> {
    const WEEKDAYS: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    let empty = WeeklyScheduleInput::default();
    let schedule_input = partial.weekly_schedule.as_ref().unwrap_or(&empty);

    let mut days = Vec::with_capacity(7);
    for weekday in WEEKDAYS {
        let input = schedule_input.day(weekday);
        let prev = previous.map(|p| p.weekly_schedule.day(weekday));

        let open = resolve_time(
            input.and_then(|d| d.open.as_deref()),
            prev.map(|d| d.open.as_str()),
            &defaults.open,
            &format!("{:?}.open", weekday),
        )?;
        let close = resolve_time(
            input.and_then(|d| d.close.as_deref()),
            prev.map(|d| d.close.as_str()),
            &defaults.close,
            &format!("{:?}.close", weekday),
        )?;
        let closed = input
            .and_then(|d| d.closed)
            .or(prev.map(|d| d.closed))
            .unwrap_or(false);

        if !closed && open >= close {
            return Err(AppError::Validation(format!(
                "{:?}: open ({}) must be before close ({})",
                weekday, open, close
            )));
        }
        days.push(DayHours { open, close, closed });
    }

    let mut days = days.into_iter();
    let weekly_schedule = WeeklySchedule {
        monday: days.next().unwrap(),
        tuesday: days.next().unwrap(),
        wednesday: days.next().unwrap(),
        thursday: days.next().unwrap(),
        friday: days.next().unwrap(),
        saturday: days.next().unwrap(),
        sunday: days.next().unwrap(),
    };

    let exceptions = match &partial.exceptions {
        Some(list) => normalize_exceptions(list)?,
        None => previous.map(|p| p.exceptions.clone()).unwrap_or_default(),
    };

    let slot_minutes = partial
        .slot_minutes
        .or(previous.map(|p| p.slot_minutes))
        .unwrap_or(defaults.slot_minutes);
    if !(5..=240).contains(&slot_minutes) {
        return Err(AppError::Validation(format!(
            "slotMinutes must be between 5 and 240, got {}",
            slot_minutes
        )));
    }

    let timezone = partial
        .timezone
        .clone()
        .or_else(|| previous.map(|p| p.timezone.clone()))
        .unwrap_or_else(|| defaults.timezone.clone());
    if timezone.parse::<chrono_tz::Tz>().is_err() {
        return Err(AppError::Validation(format!("Unknown timezone: {}", timezone)));
    }

    let day_start = resolve_time(
        partial.day_start.as_deref(),
        previous.map(|p| p.day_start.as_str()),
        &defaults.day_start,
        "dayStart",
    )?;
    let night_start = resolve_time(
        partial.night_start.as_deref(),
        previous.map(|p| p.night_start.as_str()),
        &defaults.night_start,
        "nightStart",
    )?;

    Ok(OperatingHoursConfig {
        weekly_schedule,
        exceptions,
        slot_minutes,
        timezone,
        day_start,
        night_start,
    })
}

/// Normalize a supplied time, else keep the previous value, else the default.
/// Previous and default values still pass through the normalizer so a config
/// can never carry a non-canonical time forward.
fn resolve_time(
    supplied: Option<&str>,
    previous: Option<&str>,
    default: &str,
    field: &str,
) -> AppResult<String> {
    let raw = supplied.or(previous).unwrap_or(default);
    normalize_to_hhmm(raw)
        .ok_or_else(|| AppError::TimeFormat(format!("{}: cannot parse '{}'", field, raw)))
}

/// Deduplicate exceptions by date (last write wins) and canonicalize ranges
fn normalize_exceptions(list: &[ScheduleException]) -> AppResult<Vec<ScheduleException>> {
    let mut by_date: IndexMap<NaiveDate, ScheduleException> = IndexMap::new();
    for exception in list {
        let ranges = match &exception.ranges {
            Some(ranges) => {
                let mut normalized = Vec::with_capacity(ranges.len());
                for range in ranges {
                    let start = normalize_to_hhmm(&range.start).ok_or_else(|| {
                        AppError::TimeFormat(format!(
                            "exception {}: cannot parse range start '{}'",
                            exception.date, range.start
                        ))
                    })?;
                    let end = normalize_to_hhmm(&range.end).ok_or_else(|| {
                        AppError::TimeFormat(format!(
                            "exception {}: cannot parse range end '{}'",
                            exception.date, range.end
                        ))
                    })?;
                    normalized.push(TimeRange { start, end });
                }
                Some(normalized)
            }
            None => None,
        };
        by_date.insert(
            exception.date,
            ScheduleException { date: exception.date, closed: exception.closed, ranges },
        );
    }
    Ok(by_date.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> BookingDefaults {
        BookingDefaults::default()
    }

    fn base_config() -> OperatingHoursConfig {
        normalize_config(&OperatingHoursInput::default(), None, &defaults()).unwrap()
    }

    #[test]
    fn test_normalize_empty_partial_yields_defaults() {
        let config = base_config();
        for day in [
            &config.weekly_schedule.monday,
            &config.weekly_schedule.tuesday,
            &config.weekly_schedule.wednesday,
            &config.weekly_schedule.thursday,
            &config.weekly_schedule.friday,
            &config.weekly_schedule.saturday,
            &config.weekly_schedule.sunday,
        ] {
            assert_eq!(day.open, "08:00");
            assert_eq!(day.close, "22:00");
            assert!(!day.closed);
        }
        assert_eq!(config.timezone, "Europe/Madrid");
        assert_eq!(config.slot_minutes, 60);
    }

    #[test]
    fn test_normalize_partial_keeps_all_seven_days() {
        let partial = OperatingHoursInput {
            weekly_schedule: Some(WeeklyScheduleInput {
                tuesday: Some(DayHoursInput {
                    open: Some("9:00 a.m.".into()),
                    close: Some("11:00 PM".into()),
                    closed: None,
                }),
                ..Default::default()
            }),
            ..Default::default()
        };
        let config = normalize_config(&partial, None, &defaults()).unwrap();
        assert_eq!(config.weekly_schedule.tuesday.open, "09:00");
        assert_eq!(config.weekly_schedule.tuesday.close, "23:00");
        // Untouched days still present with fallbacks
        assert_eq!(config.weekly_schedule.sunday.open, "08:00");
    }

    #[test]
    fn test_normalize_prefers_previous_over_default() {
        let mut previous = base_config();
        previous.weekly_schedule.friday.open = "10:00".into();
        previous.slot_minutes = 30;
        let config =
            normalize_config(&OperatingHoursInput::default(), Some(&previous), &defaults()).unwrap();
        assert_eq!(config.weekly_schedule.friday.open, "10:00");
        assert_eq!(config.slot_minutes, 30);
    }

    #[test]
    fn test_normalize_rejects_bad_time() {
        let partial = OperatingHoursInput {
            day_start: Some("sevenish".into()),
            ..Default::default()
        };
        assert!(matches!(
            normalize_config(&partial, None, &defaults()),
            Err(AppError::TimeFormat(_))
        ));
    }

    #[test]
    fn test_normalize_rejects_open_after_close() {
        let partial = OperatingHoursInput {
            weekly_schedule: Some(WeeklyScheduleInput {
                monday: Some(DayHoursInput {
                    open: Some("22:00".into()),
                    close: Some("08:00".into()),
                    closed: None,
                }),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(matches!(
            normalize_config(&partial, None, &defaults()),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_exceptions_unique_by_date_last_write_wins() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap();
        let partial = OperatingHoursInput {
            exceptions: Some(vec![
                ScheduleException { date, closed: false, ranges: Some(vec![TimeRange { start: "10:00".into(), end: "14:00".into() }]) },
                ScheduleException { date, closed: true, ranges: None },
            ]),
            ..Default::default()
        };
        let config = normalize_config(&partial, None, &defaults()).unwrap();
        assert_eq!(config.exceptions.len(), 1);
        assert!(config.exceptions[0].closed);
    }

    #[test]
    fn test_exception_overrides_weekday_rule() {
        let mut config = base_config();
        let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(); // a Monday
        config.exceptions.push(ScheduleException { date, closed: true, ranges: None });
        assert_eq!(resolve_day_rule(date, &config), DayRule { is_open: false, windows: vec![] });
    }

    #[test]
    fn test_exception_ranges_open_closed_weekday() {
        let mut config = base_config();
        config.weekly_schedule.sunday.closed = true;
        let date = NaiveDate::from_ymd_opt(2025, 6, 8).unwrap(); // a Sunday
        config.exceptions.push(ScheduleException {
            date,
            closed: false,
            ranges: Some(vec![
                TimeRange { start: "09:00".into(), end: "12:00".into() },
                TimeRange { start: "16:00".into(), end: "20:00".into() },
            ]),
        });
        let rule = resolve_day_rule(date, &config);
        assert!(rule.is_open);
        assert_eq!(rule.windows.len(), 2);
    }

    #[test]
    fn test_classify_segment_watersheds() {
        let config = base_config(); // dayStart 08:00, nightStart 18:00
        assert_eq!(classify_segment("08:00", &config), Segment::Day);
        assert_eq!(classify_segment("17:59", &config), Segment::Day);
        assert_eq!(classify_segment("18:00", &config), Segment::Night);
        assert_eq!(classify_segment("03:00", &config), Segment::Night);
    }
}
