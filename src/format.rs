//! Money, number and timestamp formatting for receipt output.

use std::fmt;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

pub const DEFAULT_CURRENCY: &str = "Rs.";

/// What an unparseable timestamp renders as.
pub const INVALID_DATE: &str = "Invalid Date";

/// Maximum fraction digits shown for amounts (en-US default grouping).
const MAX_FRACTION_DIGITS: usize = 3;

/// `"{currency} {grouped value}"`, e.g. `Rs. 1,234.5`.
pub fn format_price(value: f64, currency: &str) -> String {
    format!("{currency} {}", group_number(value))
}

/// en-US grouped number: comma thousands separators, up to three fraction
/// digits rounded half away from zero, no trailing zeros.
pub fn group_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-∞" } else { "∞" }.to_string();
    }

    let scale = 10f64.powi(MAX_FRACTION_DIGITS as i32);
    let scaled = (value.abs() * scale).round();
    let digits = format!("{:0>width$}", format!("{scaled:.0}"), width = MAX_FRACTION_DIGITS + 1);
    let (int_digits, frac_digits) = digits.split_at(digits.len() - MAX_FRACTION_DIGITS);
    let frac_digits = frac_digits.trim_end_matches('0');

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    if value < 0.0 && scaled > 0.0 {
        out.push('-');
    }
    let lead = int_digits.len() % 3;
    for (index, ch) in int_digits.chars().enumerate() {
        if index > 0 && (index + 3 - lead) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if !frac_digits.is_empty() {
        out.push('.');
        out.push_str(frac_digits);
    }
    out
}

/// Plain number display for quantities and percentages (`2`, `1.5`, `7.5`).
pub fn display_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-Infinity" } else { "Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

/// Order timestamp in the host's local zone, e.g. `Feb 24, 2026, 10:00 AM`.
pub fn format_date_time(raw: &str) -> String {
    format_date_time_in(raw, &Local)
}

pub fn format_date_time_in<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    match parse_timestamp(raw, tz) {
        Some(instant) => instant
            .with_timezone(tz)
            .format("%b %-d, %Y, %I:%M %p")
            .to_string(),
        None => INVALID_DATE.to_string(),
    }
}

/// Offset-less date-times are read as wall-clock time in `tz`; bare dates
/// are midnight UTC.
fn parse_timestamp<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }
    if let Ok(instant) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(instant.with_timezone(&Utc));
    }
    for pattern in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return tz
                .from_local_datetime(&naive)
                .earliest()
                .map(|instant| instant.with_timezone(&Utc));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    DateTime::parse_from_rfc2822(raw)
        .ok()
        .map(|instant| instant.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn formats_whole_amounts_without_decimals() {
        assert_eq!(format_price(700.0, "Rs."), "Rs. 700");
        assert_eq!(format_price(0.0, "Rs."), "Rs. 0");
        assert_eq!(format_price(812.0, "$"), "$ 812");
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(group_number(1_000.0), "1,000");
        assert_eq!(group_number(12_345.0), "12,345");
        assert_eq!(group_number(1_234_567.0), "1,234,567");
        assert_eq!(group_number(999.0), "999");
        assert_eq!(group_number(100_000.0), "100,000");
    }

    #[test]
    fn keeps_up_to_three_fraction_digits() {
        assert_eq!(group_number(1_234.5), "1,234.5");
        assert_eq!(group_number(0.1 + 0.2), "0.3");
        assert_eq!(group_number(2.3456), "2.346");
        assert_eq!(group_number(0.05), "0.05");
        assert_eq!(group_number(1.0625), "1.063");
    }

    #[test]
    fn negative_amounts_keep_their_sign() {
        assert_eq!(format_price(-5.0, "Rs."), "Rs. -5");
        assert_eq!(group_number(-1_500.25), "-1,500.25");
        assert_eq!(group_number(-0.0), "0");
        assert_eq!(group_number(-0.0001), "0");
    }

    #[test]
    fn non_finite_amounts_do_not_panic() {
        assert_eq!(group_number(f64::NAN), "NaN");
        assert_eq!(group_number(f64::INFINITY), "∞");
    }

    #[test]
    fn displays_numbers_in_shortest_form() {
        assert_eq!(display_number(2.0), "2");
        assert_eq!(display_number(1.5), "1.5");
        assert_eq!(display_number(16.0), "16");
        assert_eq!(display_number(-0.0), "0");
    }

    #[test]
    fn formats_rfc3339_in_requested_zone() {
        assert_eq!(
            format_date_time_in("2026-02-24T10:05:00Z", &Utc),
            "Feb 24, 2026, 10:05 AM"
        );
        let karachi = FixedOffset::east_opt(5 * 3600).expect("offset");
        assert_eq!(
            format_date_time_in("2026-02-24T21:30:00Z", &karachi),
            "Feb 25, 2026, 02:30 AM"
        );
    }

    #[test]
    fn formats_afternoon_with_pm() {
        assert_eq!(
            format_date_time_in("2026-07-04T15:45:12.345Z", &Utc),
            "Jul 4, 2026, 03:45 PM"
        );
    }

    #[test]
    fn offsetless_timestamps_are_wall_clock_time() {
        let karachi = FixedOffset::east_opt(5 * 3600).expect("offset");
        assert_eq!(
            format_date_time_in("2026-02-24T10:00:00", &karachi),
            "Feb 24, 2026, 10:00 AM"
        );
        assert_eq!(
            format_date_time_in("2026-02-24 18:20:00", &karachi),
            "Feb 24, 2026, 06:20 PM"
        );
    }

    #[test]
    fn bare_dates_are_midnight_utc() {
        assert_eq!(
            format_date_time_in("2026-02-24", &Utc),
            "Feb 24, 2026, 12:00 AM"
        );
    }

    #[test]
    fn invalid_timestamps_render_marker() {
        assert_eq!(format_date_time_in("not a date", &Utc), INVALID_DATE);
        assert_eq!(format_date_time_in("", &Utc), INVALID_DATE);
        assert_eq!(format_date_time_in("2026-13-45", &Utc), INVALID_DATE);
        assert_eq!(format_date_time("garbage"), INVALID_DATE);
    }
}
