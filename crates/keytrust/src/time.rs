//! Time utilities for keytrust.
//!
//! All timestamps are Unix epoch microseconds (u64).

/// Return the current time as microseconds since Unix epoch.
pub fn now_micros() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(0)
}

fn to_datetime(micros: u64) -> chrono::DateTime<chrono::Utc> {
    let secs = i64::try_from(micros / 1_000_000).unwrap_or(i64::MAX);
    chrono::DateTime::from_timestamp(secs, 0).unwrap_or(chrono::DateTime::UNIX_EPOCH)
}

/// Convert microseconds to a `YYYY-MM-DD` date string (UTC).
pub fn micros_to_date(micros: u64) -> String {
    to_datetime(micros).format("%Y-%m-%d").to_string()
}

/// Convert microseconds to a `YYYY-MM-DD HH:MM:SS UTC` string.
pub fn micros_to_datetime(micros: u64) -> String {
    to_datetime(micros)
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_micros_to_date() {
        assert_eq!(micros_to_date(0), "1970-01-01");
        // 2021-06-15T12:00:00Z
        assert_eq!(micros_to_date(1_623_758_400_000_000), "2021-06-15");
    }

    #[test]
    fn test_micros_to_datetime() {
        assert_eq!(micros_to_datetime(0), "1970-01-01 00:00:00 UTC");
        assert_eq!(
            micros_to_datetime(1_623_758_400_000_000),
            "2021-06-15 12:00:00 UTC"
        );
        // Out of chrono's range falls back to the epoch.
        assert_eq!(micros_to_datetime(u64::MAX), "1970-01-01 00:00:00 UTC");
    }

    #[test]
    fn test_now_is_after_2020() {
        assert!(now_micros() > 1_577_836_800_000_000);
    }
}
