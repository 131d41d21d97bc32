//! Issue-date reformatting: upstream ISO-8601 value to `DD/MM/YYYY`.

use crate::ModelError;
use chrono::{DateTime, NaiveDate};

const DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// Reformats an upstream date value for display. Accepts a full RFC 3339
/// timestamp (the record store's native form) or a bare `YYYY-MM-DD` date.
pub fn to_display(raw: &str) -> Result<String, ModelError> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.date_naive().format(DISPLAY_FORMAT).to_string());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.format(DISPLAY_FORMAT).to_string());
    }
    Err(ModelError::BadDate(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_rfc3339_timestamp() {
        assert_eq!(to_display("2024-01-03T00:00:00.000Z").unwrap(), "03/01/2024");
    }

    #[test]
    fn formats_bare_date() {
        assert_eq!(to_display("2024-01-03").unwrap(), "03/01/2024");
    }

    #[test]
    fn pads_single_digit_day_and_month() {
        assert_eq!(to_display("2024-09-05").unwrap(), "05/09/2024");
    }

    #[test]
    fn rejects_garbage() {
        assert!(to_display("yesterday").is_err());
    }
}
