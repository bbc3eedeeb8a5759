//! Display formatting helpers.

use chrono::{DateTime, NaiveDate, Utc};

/// Format a date as "Mar 1, 2024".
pub fn date(date: &NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Format an optional date, with a placeholder when unset.
pub fn optional_date(value: Option<&NaiveDate>) -> String {
    match value {
        Some(d) => date(d),
        None => "not set".to_string(),
    }
}

/// Format a timestamp's date part as "Mar 1, 2024".
pub fn datetime(value: &DateTime<Utc>) -> String {
    value.format("%b %-d, %Y").to_string()
}

/// Format an optional timestamp, with a placeholder when unset.
pub fn optional_datetime(value: Option<&DateTime<Utc>>) -> String {
    match value {
        Some(dt) => datetime(dt),
        None => "unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_formatting() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 1).expect("date");
        assert_eq!(date(&d), "Mar 1, 2024");
    }

    #[test]
    fn test_optional_date_placeholder() {
        assert_eq!(optional_date(None), "not set");
        let d = NaiveDate::from_ymd_opt(1990, 12, 24).expect("date");
        assert_eq!(optional_date(Some(&d)), "Dec 24, 1990");
    }

    #[test]
    fn test_optional_datetime() {
        assert_eq!(optional_datetime(None), "unknown");
        let dt: DateTime<Utc> = "2024-03-01T12:30:00Z".parse().expect("datetime");
        assert_eq!(optional_datetime(Some(&dt)), "Mar 1, 2024");
    }
}
