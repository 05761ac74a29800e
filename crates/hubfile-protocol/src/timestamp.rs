//! The two fixed timestamp grammars used by upload notifications.
//!
//! The hub stamps notifications with two differently shaped times:
//!
//! ```text
//! enqueuedTimeUtc   2016-06-01T21:22:43.7996883Z     (UTC, fraction, literal Z)
//! lastUpdatedTime   2016-06-01T21:22:41+00:00        (fixed offset)
//! ```
//!
//! Both grammars share the `YYYY-MM-DDTHH:MM:SS` head, which is checked
//! byte-for-byte before chrono ever sees it: chrono's `%m` and `%H` accept
//! single digits, and these grammars do not. Everything after the head is
//! grammar-specific and lives in its own function.

use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, TimeZone, Utc};

use crate::error::SerializerError;

/// A point in time, normalized to UTC. Millisecond resolution is all the
/// parsers ever produce.
pub type Instant = DateTime<Utc>;

/// Length of `YYYY-MM-DDTHH:MM:SS`.
const HEAD_LEN: usize = 19;

const HEAD_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const MAX_FRACTION_DIGITS: usize = 9;

/// Parses `YYYY-MM-DDTHH:MM:SS.<digits>Z` as a UTC instant.
///
/// The digits after the dot are read as a whole number of milliseconds and
/// added to the second, so `.7996883` moves the instant forward by
/// 7996.883 seconds. Hub messages have always been interpreted this way and
/// stored instants depend on it. One to nine digits are accepted.
///
/// ```rust
/// use hubfile_protocol::timestamp::parse_utc_timestamp;
///
/// let instant = parse_utc_timestamp("2016-06-01T21:22:43.7996883Z").unwrap();
/// assert_eq!(instant.timestamp_millis(), 1_464_824_159_883);
/// ```
///
/// # Errors
/// [`SerializerError::InvalidTimestamp`] if the text is empty, has any
/// character out of place, names an impossible date, or carries trailing
/// text after the `Z`.
pub fn parse_utc_timestamp(value: &str) -> Result<Instant, SerializerError> {
    let (head, tail) = split_head(value)?;
    let naive = parse_head(value, head)?;

    let fraction = tail
        .strip_prefix('.')
        .and_then(|rest| rest.strip_suffix('Z'))
        .ok_or_else(|| reject(value, "expected `.<fraction>Z` after seconds"))?;
    if fraction.is_empty()
        || fraction.len() > MAX_FRACTION_DIGITS
        || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(reject(value, "fraction must be 1 to 9 digits"));
    }
    let millis: i64 = fraction
        .parse()
        .map_err(|_| reject(value, "fraction is not a number"))?;

    Utc.from_utc_datetime(&naive)
        .checked_add_signed(Duration::milliseconds(millis))
        .ok_or_else(|| reject(value, "instant out of range"))
}

/// Parses `YYYY-MM-DDTHH:MM:SS±HH:MM` and normalizes it to UTC.
///
/// A bare `Z` in place of the offset means `+00:00`.
///
/// ```rust
/// use hubfile_protocol::timestamp::parse_offset_timestamp;
///
/// let instant = parse_offset_timestamp("2016-06-01T21:22:41+00:00").unwrap();
/// assert_eq!(instant.timestamp_millis(), 1_464_816_161_000);
/// ```
///
/// # Errors
/// [`SerializerError::InvalidTimestamp`] under the same conditions as
/// [`parse_utc_timestamp`], or if the offset is not `±HH:MM` within
/// ±23:59.
pub fn parse_offset_timestamp(value: &str) -> Result<Instant, SerializerError> {
    let (head, tail) = split_head(value)?;
    let naive = parse_head(value, head)?;
    let offset = parse_offset(value, tail)?;

    naive
        .and_local_timezone(offset)
        .single()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| reject(value, "instant out of range"))
}

fn split_head(value: &str) -> Result<(&str, &str), SerializerError> {
    if value.is_empty() {
        return Err(reject(value, "empty"));
    }
    value
        .split_at_checked(HEAD_LEN)
        .ok_or_else(|| reject(value, "too short"))
}

fn parse_head(value: &str, head: &str) -> Result<NaiveDateTime, SerializerError> {
    let shape_ok = head.bytes().enumerate().all(|(i, b)| match i {
        4 | 7 => b == b'-',
        10 => b == b'T',
        13 | 16 => b == b':',
        _ => b.is_ascii_digit(),
    });
    if !shape_ok {
        return Err(reject(value, "expected YYYY-MM-DDTHH:MM:SS"));
    }
    NaiveDateTime::parse_from_str(head, HEAD_FORMAT)
        .map_err(|e| reject(value, e.to_string()))
}

fn parse_offset(value: &str, zone: &str) -> Result<FixedOffset, SerializerError> {
    if zone == "Z" {
        return FixedOffset::east_opt(0).ok_or_else(|| reject(value, "offset out of range"));
    }

    let b = zone.as_bytes();
    let digits_ok = b.len() == 6
        && b[3] == b':'
        && [b[1], b[2], b[4], b[5]].iter().all(u8::is_ascii_digit);
    if !digits_ok {
        return Err(reject(value, "expected offset ±HH:MM"));
    }
    let sign = match b[0] {
        b'+' => 1,
        b'-' => -1,
        _ => return Err(reject(value, "offset must start with + or -")),
    };

    let hours = i32::from(b[1] - b'0') * 10 + i32::from(b[2] - b'0');
    let minutes = i32::from(b[4] - b'0') * 10 + i32::from(b[5] - b'0');
    if hours > 23 || minutes > 59 {
        return Err(reject(value, "offset out of range"));
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .ok_or_else(|| reject(value, "offset out of range"))
}

fn reject(value: &str, reason: impl Into<String>) -> SerializerError {
    let err = SerializerError::invalid_timestamp(value, reason);
    tracing::debug!(error = %err, "timestamp rejected");
    err
}

#[cfg(test)]
mod tests {
    use super::*;

    // =====================================================================
    // UTC grammar
    // =====================================================================

    #[test]
    fn test_utc_reference_vector() {
        let instant = parse_utc_timestamp("2016-06-01T21:22:43.7996883Z").unwrap();
        assert_eq!(instant.timestamp_millis(), 1_464_824_159_883);
    }

    #[test]
    fn test_utc_four_digit_fraction_is_milliseconds() {
        let instant = parse_utc_timestamp("2016-06-01T21:22:43.0123Z").unwrap();
        assert_eq!(instant.timestamp_millis(), 1_464_816_163_123);
    }

    #[test]
    fn test_utc_zero_fraction() {
        let instant = parse_utc_timestamp("1970-01-01T00:00:00.0000Z").unwrap();
        assert_eq!(instant.timestamp_millis(), 0);
    }

    #[test]
    fn test_utc_missing_fraction_and_zone_fails() {
        let err = parse_utc_timestamp("2016-06-01T21:22:43").unwrap_err();
        assert!(err.is_invalid_timestamp());
    }

    #[test]
    fn test_utc_empty_fails() {
        assert!(parse_utc_timestamp("").unwrap_err().is_invalid_timestamp());
    }

    #[test]
    fn test_utc_free_text_fails() {
        assert!(parse_utc_timestamp("This is not a data and time").is_err());
    }

    #[test]
    fn test_utc_single_digit_fields_fail() {
        assert!(parse_utc_timestamp("2016-6-1T4:22:43.7996883Z").is_err());
    }

    #[test]
    fn test_utc_missing_z_fails() {
        assert!(parse_utc_timestamp("2016-06-01T21:22:43.7996").is_err());
    }

    #[test]
    fn test_utc_empty_fraction_fails() {
        assert!(parse_utc_timestamp("2016-06-01T21:22:43.Z").is_err());
    }

    #[test]
    fn test_utc_ten_digit_fraction_fails() {
        assert!(parse_utc_timestamp("2016-06-01T21:22:43.1234567890Z").is_err());
    }

    #[test]
    fn test_utc_trailing_text_fails() {
        assert!(parse_utc_timestamp("2016-06-01T21:22:43.7996Zjunk").is_err());
    }

    #[test]
    fn test_utc_offset_form_fails() {
        assert!(parse_utc_timestamp("2016-06-01T21:22:41+00:00").is_err());
    }

    #[test]
    fn test_utc_impossible_date_fails() {
        assert!(parse_utc_timestamp("2016-02-30T21:22:43.7996Z").is_err());
    }

    #[test]
    fn test_utc_multibyte_head_fails_without_panicking() {
        // Splitting inside a multi-byte character must be an error, not a panic.
        assert!(parse_utc_timestamp("2016-06-01T21:22:4\u{1234}.1Z").is_err());
        assert!(parse_utc_timestamp("\u{1234}2016-06-01T21:22:43.7996883Z").is_err());
    }

    // =====================================================================
    // Offset grammar
    // =====================================================================

    #[test]
    fn test_offset_reference_vector() {
        let instant = parse_offset_timestamp("2016-06-01T21:22:41+00:00").unwrap();
        assert_eq!(instant.timestamp_millis(), 1_464_816_161_000);
    }

    #[test]
    fn test_offset_negative_is_applied() {
        let instant = parse_offset_timestamp("2016-06-01T21:22:41-02:00").unwrap();
        assert_eq!(instant.timestamp_millis(), 1_464_823_361_000);
    }

    #[test]
    fn test_offset_positive_with_minutes_is_applied() {
        let instant = parse_offset_timestamp("2016-06-02T02:52:41+05:30").unwrap();
        assert_eq!(instant.timestamp_millis(), 1_464_816_161_000);
    }

    #[test]
    fn test_offset_z_is_zero() {
        let instant = parse_offset_timestamp("2016-06-01T21:22:41Z").unwrap();
        assert_eq!(instant.timestamp_millis(), 1_464_816_161_000);
    }

    #[test]
    fn test_offset_missing_zone_fails() {
        let err = parse_offset_timestamp("2016-06-01T21:22:43").unwrap_err();
        assert!(err.is_invalid_timestamp());
    }

    #[test]
    fn test_offset_empty_fails() {
        assert!(parse_offset_timestamp("").is_err());
    }

    #[test]
    fn test_offset_free_text_fails() {
        assert!(parse_offset_timestamp("This is not a data and time").is_err());
    }

    #[test]
    fn test_offset_impossible_day_fails() {
        assert!(parse_offset_timestamp("2016-06-40T21:22:41+00:00").is_err());
    }

    #[test]
    fn test_offset_without_colon_fails() {
        assert!(parse_offset_timestamp("2016-06-01T21:22:41+0000").is_err());
    }

    #[test]
    fn test_offset_out_of_range_fails() {
        assert!(parse_offset_timestamp("2016-06-01T21:22:41+24:00").is_err());
        assert!(parse_offset_timestamp("2016-06-01T21:22:41+01:60").is_err());
    }

    #[test]
    fn test_offset_fractional_seconds_fail() {
        assert!(parse_offset_timestamp("2016-06-01T21:22:41.123+00:00").is_err());
    }
}
