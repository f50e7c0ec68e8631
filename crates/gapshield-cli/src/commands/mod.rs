pub mod check;
pub mod config;
pub mod keygen;
pub mod schedule;

use chrono::{DateTime, NaiveDate, Utc};
use gapshield_core::ValidationError;

/// Parse `YYYY-MM-DD`, defaulting to the current UTC day.
pub(crate) fn parse_date(raw: Option<&str>) -> Result<NaiveDate, ValidationError> {
    match raw {
        None => Ok(Utc::now().date_naive()),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDate(raw.to_string())),
    }
}

/// Parse an RFC 3339 instant, defaulting to now.
pub(crate) fn parse_timestamp(raw: Option<&str>) -> Result<DateTime<Utc>, ValidationError> {
    match raw {
        None => Ok(Utc::now()),
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| ValidationError::InvalidTimestamp(raw.to_string())),
    }
}

pub(crate) fn require_child_id(raw: &str) -> Result<&str, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(ValidationError::EmptyChildId)
    } else {
        Ok(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_explicit_date() {
        let d = parse_date(Some("2025-12-16")).unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2025, 12, 16).unwrap());
        assert!(matches!(
            parse_date(Some("16/12/2025")),
            Err(ValidationError::InvalidDate(_))
        ));
    }

    #[test]
    fn parses_offset_timestamps_as_utc() {
        let t = parse_timestamp(Some("2025-12-16T09:30:00+02:00")).unwrap();
        assert_eq!(t.to_rfc3339(), "2025-12-16T07:30:00+00:00");
        assert!(parse_timestamp(Some("yesterday")).is_err());
    }

    #[test]
    fn rejects_blank_child() {
        assert_eq!(require_child_id("  "), Err(ValidationError::EmptyChildId));
        assert_eq!(require_child_id(" kid "), Ok("kid"));
    }
}
