use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc};
use tracing::warn;

/// Publication dates outside this window are treated as feed garbage.
const MIN_PLAUSIBLE_YEAR: i32 = 2020;
const MAX_PLAUSIBLE_YEAR: i32 = 2100;

/// Parse an RFC 2822 publication date ("Wed, 02 Oct 2024 13:00:00 GMT")
/// into a comparable instant. Returns None when the string does not match
/// the grammar or the year is implausible; callers must treat that as
/// "ordering key absent", never as a fatal parse error.
pub fn parse_pub_date(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.len() < 20 {
        warn!(date = trimmed, "date too short");
        return None;
    }

    let parsed = match DateTime::parse_from_rfc2822(trimmed) {
        Ok(dt) => dt.with_timezone(&Utc),
        Err(e) => {
            warn!(date = trimmed, error = %e, "unparseable date");
            return None;
        }
    };

    if parsed.year() < MIN_PLAUSIBLE_YEAR || parsed.year() > MAX_PLAUSIBLE_YEAR {
        warn!(date = trimmed, year = parsed.year(), "year out of range");
        return None;
    }

    Some(parsed)
}

/// Short local-time label for display: "Wed 3:05 PM".
pub fn format_time_label(published: DateTime<Utc>, timezone_hours: i32) -> String {
    let offset = match FixedOffset::east_opt(timezone_hours * 3600) {
        Some(o) => o,
        None => return String::new(),
    };
    let local = published.with_timezone(&offset);

    let mut hour = local.hour();
    let suffix = if hour >= 12 { "PM" } else { "AM" };
    if hour > 12 {
        hour -= 12;
    }
    if hour == 0 {
        hour = 12;
    }

    format!(
        "{} {}:{:02} {}",
        local.format("%a"),
        hour,
        local.minute(),
        suffix
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_rfc2822_dates() {
        let dt = parse_pub_date("Wed, 02 Oct 2024 13:00:00 GMT").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 10, 2, 13, 0, 0).unwrap());
    }

    #[test]
    fn garbage_yields_none() {
        assert!(parse_pub_date("").is_none());
        assert!(parse_pub_date("not a date at all here").is_none());
        assert!(parse_pub_date("Wed, 02 Oct").is_none());
    }

    #[test]
    fn implausible_year_yields_none() {
        assert!(parse_pub_date("Wed, 02 Oct 2002 13:00:00 GMT").is_none());
    }

    #[test]
    fn parsed_dates_are_comparable() {
        let older = parse_pub_date("Tue, 01 Oct 2024 13:00:00 GMT").unwrap();
        let newer = parse_pub_date("Wed, 02 Oct 2024 13:00:00 GMT").unwrap();
        assert!(newer > older);
    }

    #[test]
    fn time_label_uses_twelve_hour_clock() {
        let dt = Utc.with_ymd_and_hms(2024, 10, 2, 20, 5, 0).unwrap();
        // UTC-5: 3:05 PM on Wednesday
        assert_eq!(format_time_label(dt, -5), "Wed 3:05 PM");
    }

    #[test]
    fn midnight_renders_as_twelve_am() {
        let dt = Utc.with_ymd_and_hms(2024, 10, 2, 0, 10, 0).unwrap();
        assert_eq!(format_time_label(dt, 0), "Wed 12:10 AM");
    }
}
