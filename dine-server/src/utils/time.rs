//! Time helpers
//!
//! All persisted timestamps are Unix epoch milliseconds (UTC).

use chrono::{NaiveDate, TimeZone, Utc};

/// Current time as Unix millis
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Millisecond range [start, end) covering one UTC calendar day
pub fn day_range_millis(date: NaiveDate) -> (i64, i64) {
    let start = Utc
        .from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap_or_default())
        .timestamp_millis();
    (start, start + 24 * 60 * 60 * 1000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_range_covers_full_day() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let (start, end) = day_range_millis(date);
        assert_eq!(end - start, 86_400_000);
    }
}
