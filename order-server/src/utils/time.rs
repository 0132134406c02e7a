//! Time utilities — business-timezone conversions and the injectable clock
//!
//! All date → timestamp conversion happens at the API handler / service
//! layer; the repository only ever receives `i64` Unix millis.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// Source of "now" for order dating and sequence generation.
///
/// Injected so tests can pin the calendar day; see [`FixedClock`].
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Test clock pinned to a settable instant
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<RwLock<DateTime<Utc>>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(RwLock::new(now)),
        }
    }

    /// Move the pinned instant (e.g. to simulate a day rollover)
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.write().expect("clock lock poisoned") = now;
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        *self.now.read().expect("clock lock poisoned")
    }
}

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// Calendar day of `instant` in the business timezone, as `YYYYMMDD`
pub fn day_stamp(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%Y%m%d").to_string()
}

/// Date + hour/minute/second → Unix millis (business timezone)
///
/// DST gap fallback: if the local time does not exist (spring-forward),
/// fall back to interpreting the naive time as UTC.
fn date_hms_to_millis(date: NaiveDate, hour: u32, min: u32, sec: u32, tz: Tz) -> i64 {
    let naive = date.and_hms_opt(hour, min, sec).unwrap();
    naive
        .and_local_timezone(tz)
        .latest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// Start of day (00:00:00) → Unix millis (business timezone)
pub fn day_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    date_hms_to_millis(date, 0, 0, 0, tz)
}

/// End of day → next day 00:00:00 as Unix millis (business timezone)
///
/// Callers use `< end` (exclusive) semantics, which in millis is identical
/// to an inclusive bound at 23:59:59.999.
pub fn day_end_millis(date: NaiveDate, tz: Tz) -> i64 {
    let next_day = date.succ_opt().unwrap_or(date);
    date_hms_to_millis(next_day, 0, 0, 0, tz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_date_valid() {
        let date = parse_date("2024-01-31").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
    }

    #[test]
    fn test_parse_date_invalid() {
        assert!(parse_date("31/01/2024").is_err());
        assert!(parse_date("2024-13-01").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_day_bounds_utc() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let start = day_start_millis(date, chrono_tz::UTC);
        let end = day_end_millis(date, chrono_tz::UTC);
        // Exactly 24 hours apart
        assert_eq!(end - start, 24 * 3600 * 1000);
        // 23:59:59.999 is inside, next midnight is outside
        assert!(start + 24 * 3600 * 1000 - 1 < end);
        assert!(end >= start + 24 * 3600 * 1000);
    }

    #[test]
    fn test_day_stamp_respects_timezone() {
        // 2024-01-15 23:30 UTC is already 2024-01-16 in Jakarta (UTC+7)
        let instant = Utc.with_ymd_and_hms(2024, 1, 15, 23, 30, 0).unwrap();
        assert_eq!(day_stamp(instant, chrono_tz::UTC), "20240115");
        assert_eq!(day_stamp(instant, chrono_tz::Asia::Jakarta), "20240116");
    }

    #[test]
    fn test_fixed_clock_set() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
        assert_eq!(clock.now_utc().date_naive().to_string(), "2024-01-01");
        clock.set(Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 1).unwrap());
        assert_eq!(clock.now_utc().date_naive().to_string(), "2024-01-02");
    }
}
