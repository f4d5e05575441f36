//! Display formatting for counters, axis labels and timestamps.

use chrono::{DateTime, Duration, TimeZone, Timelike};

use crate::config;

/// Round to an integer and group thousands: `1234567.4` -> `"1,234,567"`.
pub fn grouped(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(config::THOUSANDS_SEPARATOR);
        }
        out.push(ch);
    }
    out
}

/// `grouped` plus the currency suffix.
pub fn price(value: f64) -> String {
    format!("{} {}", grouped(value), config::CURRENCY)
}

/// Hour-of-day labels for the trailing `count` hours ending at `now`,
/// oldest first: `["15:00", ..., "14:00"]`.
pub fn trailing_hour_labels<Tz: TimeZone>(now: &DateTime<Tz>, count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let back = i64::try_from(count - 1 - i).unwrap_or(i64::MAX);
            let hour = now.clone() - Duration::hours(back);
            format!("{}:00", hour.hour())
        })
        .collect()
}

/// Text for the last-updated element.
pub fn update_time<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "🕐 Last updated: {}",
        now.format(config::UPDATE_TIME_FORMAT)
    )
}
