use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

#[macro_export]
macro_rules! unit_short {
  ($name:expr, $($tail:tt)*) => {
    {
      log::debug!("* {}", $name);
      let now = std::time::Instant::now();
      let value = $($tail)*;
      log::debug!("Done  `{}` ({} ms)", $name, now.elapsed().as_millis());
      value
    }
  };
}

/// Parse a backend timestamp.
///
/// Values without an offset are local time, values with one are converted to it.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Local>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Some(date.with_timezone(&Local));
    }
    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()?;
    Local.from_local_datetime(&naive).earliest()
}

/// How long ago `created_at` was, relative to `now`.
///
/// `"42s"`, `"5m"` and `"3h"` below a day, then the calendar date `M/D/YYYY`.
/// Unparseable input is returned unchanged.
pub fn format_relative(created_at: &str, now: DateTime<Local>) -> String {
    let Some(date) = parse_timestamp(created_at) else {
        return created_at.to_string();
    };
    let seconds = (now - date).num_milliseconds().div_euclid(1000);

    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m", seconds / 60)
    } else if seconds < 86400 {
        format!("{}h", seconds / 3600)
    } else {
        date.format("%-m/%-d/%Y").to_string()
    }
}

pub fn format_date(created_at: &str) -> String {
    format_relative(created_at, Local::now())
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn ago(seconds: i64) -> String {
        (now() - Duration::seconds(seconds))
            .naive_local()
            .format("%Y-%m-%dT%H:%M:%S%.3f")
            .to_string()
    }

    #[test]
    fn seconds_minutes_hours() {
        assert_eq!(format_relative(&ago(5), now()), "5s");
        assert_eq!(format_relative(&ago(0), now()), "0s");
        assert_eq!(format_relative(&ago(59), now()), "59s");
        assert_eq!(format_relative(&ago(125), now()), "2m");
        assert_eq!(format_relative(&ago(3599), now()), "59m");
        assert_eq!(format_relative(&ago(7300), now()), "2h");
        assert_eq!(format_relative(&ago(86399), now()), "23h");
    }

    #[test]
    fn older_than_a_day_is_a_date() {
        let created = ago(100_000);
        let expected = (now() - Duration::seconds(100_000))
            .format("%-m/%-d/%Y")
            .to_string();
        assert_eq!(format_relative(&created, now()), expected);
        assert_eq!(format_relative("2023-01-05T08:30:00", now()), "1/5/2023");
    }

    #[test]
    fn accepts_offsets_and_fractions() {
        let with_offset = (now() - Duration::seconds(90)).to_rfc3339();
        assert_eq!(format_relative(&with_offset, now()), "1m");
        assert!(parse_timestamp("2024-05-01T10:00:00.123456").is_some());
        assert!(parse_timestamp("2024-05-01 10:00:00").is_some());
    }

    #[test]
    fn future_timestamps_count_negative_seconds() {
        let ahead = (now() + Duration::seconds(3))
            .naive_local()
            .format("%Y-%m-%dT%H:%M:%S")
            .to_string();
        assert_eq!(format_relative(&ahead, now()), "-3s");
    }

    #[test]
    fn garbage_passes_through() {
        assert_eq!(format_relative("yesterday", now()), "yesterday");
    }
}
