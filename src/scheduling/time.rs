//! Time-of-day normalization
//!
//! Operator-facing forms accept loose time input ("8:00 a.m.", "10:00 PM",
//! "08:00"); everything downstream works on a canonical 24-hour `HH:mm`
//! string. Parsing is strict: an input we cannot canonicalize yields `None`
//! and the caller decides the fallback, never this module.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use regex::Regex;

static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})(?::(\d{2}))?(am|pm)?$").unwrap());

/// Canonicalize a time-of-day string to 24-hour `HH:mm`.
///
/// Accepts 12-hour inputs with any punctuation/whitespace variant of the
/// meridiem marker (`a.m.`, `AM`, `pm`), and strict 24-hour `HH:mm` which
/// passes through unchanged. Returns `None` for anything else.
pub fn normalize_to_hhmm(input: &str) -> Option<String> {
    let compact: String = input
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .collect();

    let caps = TIME_RE.captures(&compact)?;
    let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
    let minute: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    if minute > 59 {
        return None;
    }

    match caps.get(3).map(|m| m.as_str()) {
        Some(meridiem) => {
            if hour == 0 || hour > 12 {
                return None;
            }
            let hour24 = match (meridiem, hour) {
                ("am", 12) => 0,
                ("am", h) => h,
                ("pm", 12) => 12,
                ("pm", h) => h + 12,
                _ => unreachable!(),
            };
            Some(format!("{:02}:{:02}", hour24, minute))
        }
        None => {
            // Without a meridiem only strict HH:mm is accepted; "8:00" is
            // ambiguous and must be rejected rather than guessed at.
            if is_canonical_hhmm(input) {
                Some(input.to_string())
            } else {
                None
            }
        }
    }
}

/// Whether a string is already canonical `HH:mm` (two-digit, zero-padded)
pub fn is_canonical_hhmm(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return false;
    }
    let digits = s[..2]
        .chars()
        .chain(s[3..].chars())
        .all(|c| c.is_ascii_digit());
    if !digits {
        return false;
    }
    let hour: u32 = s[..2].parse().unwrap_or(99);
    let minute: u32 = s[3..].parse().unwrap_or(99);
    hour < 24 && minute < 60
}

/// Minute-of-day for a canonical `HH:mm` string
pub fn hhmm_to_minutes(hhmm: &str) -> Option<u32> {
    if !is_canonical_hhmm(hhmm) {
        return None;
    }
    let hour: u32 = hhmm[..2].parse().ok()?;
    let minute: u32 = hhmm[3..].parse().ok()?;
    Some(hour * 60 + minute)
}

/// Combine a calendar date and a canonical `HH:mm` into the UTC instant of
/// that wall-clock time in the given IANA zone.
///
/// The center's configured zone may differ from the server's, so the process
/// local zone is never consulted. A wall-clock time that does not exist in
/// the zone (spring-forward gap) resolves to the first valid instant after
/// the gap; an ambiguous time (fall-back) takes the earlier offset.
pub fn combine_date_and_time(date: NaiveDate, hhmm: &str, tz: Tz) -> Option<DateTime<Utc>> {
    let minutes = hhmm_to_minutes(hhmm)?;
    let time = NaiveTime::from_num_seconds_from_midnight_opt(minutes * 60, 0)?;
    let naive = date.and_time(time);

    match tz.from_local_datetime(&naive) {
        chrono::LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        chrono::LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        chrono::LocalResult::None => {
            // Spring-forward gap: DST shifts are one hour in every zone we
            // serve, so the hour after the requested time is valid.
            let shifted = naive + chrono::Duration::hours(1);
            tz.from_local_datetime(&shifted)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
        }
    }
}

/// Project a UTC instant back to its `HH:mm` wall-clock time in a zone
pub fn instant_to_hhmm(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meridiem_variants_agree() {
        for input in ["8:00 a.m.", "8:00am", "8:00 AM", "8 am", "08:00"] {
            assert_eq!(normalize_to_hhmm(input).as_deref(), Some("08:00"), "{input}");
        }
    }

    #[test]
    fn test_pm_conversion() {
        assert_eq!(normalize_to_hhmm("10:00 p.m.").as_deref(), Some("22:00"));
        assert_eq!(normalize_to_hhmm("1:30pm").as_deref(), Some("13:30"));
    }

    #[test]
    fn test_midnight_and_noon() {
        assert_eq!(normalize_to_hhmm("12:00 a.m.").as_deref(), Some("00:00"));
        assert_eq!(normalize_to_hhmm("12:00 p.m.").as_deref(), Some("12:00"));
    }

    #[test]
    fn test_canonical_passthrough_is_idempotent() {
        for hhmm in ["00:00", "08:00", "13:45", "23:59"] {
            let once = normalize_to_hhmm(hhmm).unwrap();
            assert_eq!(once, hhmm);
            assert_eq!(normalize_to_hhmm(&once).unwrap(), hhmm);
        }
    }

    #[test]
    fn test_rejects_ambiguous_and_garbage() {
        assert_eq!(normalize_to_hhmm("8:00"), None); // no meridiem, not HH:mm
        assert_eq!(normalize_to_hhmm("25:00"), None);
        assert_eq!(normalize_to_hhmm("10:75"), None);
        assert_eq!(normalize_to_hhmm("13:00 pm"), None);
        assert_eq!(normalize_to_hhmm("noonish"), None);
        assert_eq!(normalize_to_hhmm(""), None);
    }

    #[test]
    fn test_combine_respects_zone() {
        let date = NaiveDate::from_ymd_opt(2025, 7, 15).unwrap();
        let instant = combine_date_and_time(date, "10:00", chrono_tz::Europe::Madrid).unwrap();
        // Madrid is UTC+2 in July
        assert_eq!(instant.to_rfc3339(), "2025-07-15T08:00:00+00:00");
    }

    #[test]
    fn test_combine_dst_gap_rolls_forward() {
        // 2025-03-30 02:30 does not exist in Madrid (clocks jump 02:00 -> 03:00)
        let date = NaiveDate::from_ymd_opt(2025, 3, 30).unwrap();
        let instant = combine_date_and_time(date, "02:30", chrono_tz::Europe::Madrid).unwrap();
        assert_eq!(instant_to_hhmm(instant, chrono_tz::Europe::Madrid), "03:30");
    }

    #[test]
    fn test_hhmm_to_minutes() {
        assert_eq!(hhmm_to_minutes("00:00"), Some(0));
        assert_eq!(hhmm_to_minutes("09:30"), Some(570));
        assert_eq!(hhmm_to_minutes("9:30"), None);
    }
}
