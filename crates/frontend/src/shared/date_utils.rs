//! Date display helpers (DD/MM/YYYY, as the backend's users read them)

use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// ISO datetime to `DD/MM/YYYY HH:MM`.
/// "2024-03-15T14:02:26.123Z" -> "15/03/2024 14:02"
pub fn format_datetime(datetime_str: &str) -> String {
    let trimmed = datetime_str.trim_end_matches('Z');
    let trimmed = trimmed.split('.').next().unwrap_or(trimmed);
    match NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        Ok(dt) => dt.format("%d/%m/%Y %H:%M").to_string(),
        Err(_) => format_date(datetime_str),
    }
}

/// ISO date (or the date part of a datetime) to `DD/MM/YYYY`.
/// Anything unparseable is shown as received.
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(d) => d.format("%d/%m/%Y").to_string(),
        Err(_) => date_str.to_string(),
    }
}

/// First day of `today`'s month through `today`, both ISO
pub fn month_to_date(today: NaiveDate) -> (String, String) {
    let first = today.with_day(1).unwrap_or(today);
    (
        first.format("%Y-%m-%d").to_string(),
        today.format("%Y-%m-%d").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_datetime("2024-03-15T14:02:26.123Z"), "15/03/2024 14:02");
        assert_eq!(format_datetime("2024-12-31T23:59:59"), "31/12/2024 23:59");
        assert_eq!(format_datetime("2024-12-31"), "31/12/2024");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15/03/2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15/03/2024");
        assert_eq!(format_date("ayer"), "ayer");
    }

    #[test]
    fn test_month_to_date() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 18).unwrap();
        assert_eq!(
            month_to_date(today),
            ("2024-06-01".to_string(), "2024-06-18".to_string())
        );
    }
}
