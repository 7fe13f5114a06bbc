use time::{Date, Duration, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

pub fn now() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}

pub fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> crate::Result<Date> {
    Date::parse(value.trim(), DATE_FORMAT)
        .map_err(|_| crate::Error::User(format!("Invalid date '{value}', expected YYYY-MM-DD")))
}

pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT).unwrap_or_default()
}

/// Dates are persisted as the unix timestamp of their midnight UTC.
pub fn date_to_timestamp(date: Date) -> i64 {
    date.midnight().assume_utc().unix_timestamp()
}

pub fn timestamp_to_date(timestamp: i64) -> crate::Result<Date> {
    Ok(OffsetDateTime::from_unix_timestamp(timestamp)?.date())
}

pub fn add_days(date: Date, days: i64) -> Date {
    date.saturating_add(Duration::days(days))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn parse_and_format() {
        let value = parse_date("2024-03-04").unwrap();
        assert_eq!(value, date!(2024 - 03 - 04));
        assert_eq!(format_date(value), "2024-03-04");
        assert_eq!(format_date(date!(0999 - 12 - 01)), "0999-12-01");
        assert!(parse_date("04/03/2024").is_err());
    }

    #[test]
    fn timestamp_is_midnight_utc() {
        let value = date!(1970 - 01 - 02);
        assert_eq!(date_to_timestamp(value), 86_400);
        assert_eq!(timestamp_to_date(86_400 + 3_600).unwrap(), value);
    }

    #[test]
    fn add_days_crosses_month() {
        assert_eq!(add_days(date!(2024 - 01 - 29), 6), date!(2024 - 02 - 04));
    }
}
