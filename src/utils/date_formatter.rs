use chrono::{DateTime, TimeZone, Utc};

use crate::format::TimeUnit;

const MINUTE: f64 = 60.0;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmartDateFormat {
    Year,
    MonthYear,
    DayMonth,
    HourMin,
    HourMinSec,
}

impl SmartDateFormat {
    /// strftime pattern, e.g. `Jan 2024` for `MonthYear`.
    pub fn pattern(self) -> &'static str {
        match self {
            Self::Year => "%Y",
            Self::MonthYear => "%b %Y",
            Self::DayMonth => "%d %b",
            Self::HourMin => "%H:%M",
            Self::HourMinSec => "%H:%M:%S",
        }
    }
}

/// Coarsest first; the first span threshold exceeded wins.
const SPAN_FORMATS: [(f64, SmartDateFormat); 4] = [
    (2.0 * 365.0 * DAY, SmartDateFormat::Year),
    (2.0 * 30.0 * DAY, SmartDateFormat::MonthYear),
    (1.5 * DAY, SmartDateFormat::DayMonth),
    (5.0 * MINUTE, SmartDateFormat::HourMin),
];

/// Picks the coarsest readable format for a visible span in seconds.
pub fn determine_date_format(visible_range_sec: f64) -> SmartDateFormat {
    SPAN_FORMATS
        .iter()
        .find(|(threshold, _)| visible_range_sec > *threshold)
        .map(|(_, format)| *format)
        .unwrap_or(SmartDateFormat::HourMinSec)
}

pub fn to_seconds(value: f64, unit: TimeUnit) -> f64 {
    match unit {
        TimeUnit::Seconds => value,
        TimeUnit::Milliseconds => value / 1e3,
        TimeUnit::Microseconds => value / 1e6,
        TimeUnit::Nanoseconds => value / 1e9,
    }
}

fn to_datetime(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    Utc.timestamp_opt(seconds.floor() as i64, 0).earliest()
}

/// Formats an axis value as a UTC timestamp. Values chrono cannot represent
/// fall back to plain numbers.
pub fn format_timestamp(value: f64, format: SmartDateFormat, unit: TimeUnit) -> String {
    match to_datetime(to_seconds(value, unit)) {
        Some(dt) => dt.format(format.pattern()).to_string(),
        None => format!("{:.2}", value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_selection() {
        assert_eq!(determine_date_format(30.0), SmartDateFormat::HourMinSec);
        assert_eq!(determine_date_format(3600.0), SmartDateFormat::HourMin);
        assert_eq!(determine_date_format(5.0 * DAY), SmartDateFormat::DayMonth);
        assert_eq!(determine_date_format(90.0 * DAY), SmartDateFormat::MonthYear);
        assert_eq!(determine_date_format(3.0 * 365.0 * DAY), SmartDateFormat::Year);
    }

    #[test]
    fn test_format_epoch() {
        assert_eq!(
            format_timestamp(0.0, SmartDateFormat::HourMinSec, TimeUnit::Seconds),
            "00:00:00"
        );
        assert_eq!(
            format_timestamp(86_400_000.0, SmartDateFormat::DayMonth, TimeUnit::Milliseconds),
            "02 Jan"
        );
        assert_eq!(
            format_timestamp(f64::NAN, SmartDateFormat::Year, TimeUnit::Seconds),
            "NaN"
        );
    }
}
