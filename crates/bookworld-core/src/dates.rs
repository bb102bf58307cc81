//! # Date Conversion
//!
//! Two textual date worlds meet in the order listing:
//!
//! - the workbook stores dates as numeric serials counted from the 1900
//!   epoch (with the format's historical leap-year miscount baked in);
//! - the relational store keeps SQL timestamps (`2024-01-15 10:30:00`).
//!
//! Both are rendered as `ДД.ММ.ГГГГ` for display. Conversion never fails:
//! unparsable input falls back to the raw text.

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Display format for all order dates.
pub const DISPLAY_DATE_FORMAT: &str = "%d.%m.%Y";

/// Converts a workbook date serial into a calendar date.
///
/// The epoch convention is `1900-01-01 + (serial − 2) days`: the −2 offset
/// compensates for the format's 1-based day numbering and its phantom
/// 1900-02-29. Serial 1 is therefore 1899-12-31 and serial 44927 is
/// 2023-01-01.
pub fn serial_to_date(serial: i64) -> Option<NaiveDate> {
    let epoch = NaiveDate::from_ymd_opt(1900, 1, 1)?;
    epoch.checked_add_signed(Duration::try_days(serial - 2)?)
}

/// Converts a raw workbook cell into a display date.
///
/// Non-integer input (already-formatted dates, free text, empty cells)
/// falls back to the raw value unchanged.
pub fn serial_text_to_display(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.parse::<i64>().ok().and_then(serial_to_date) {
        Some(date) => date.format(DISPLAY_DATE_FORMAT).to_string(),
        None => raw.to_string(),
    }
}

/// Converts a store timestamp (`%Y-%m-%d %H:%M:%S` or `%Y-%m-%d`) into a
/// display date, falling back to the raw value when it parses as neither.
pub fn store_timestamp_to_display(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return dt.format(DISPLAY_DATE_FORMAT).to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.format(DISPLAY_DATE_FORMAT).to_string();
    }

    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_one_is_last_day_of_1899() {
        assert_eq!(
            serial_to_date(1),
            NaiveDate::from_ymd_opt(1899, 12, 31)
        );
    }

    #[test]
    fn serial_44927_is_new_year_2023() {
        assert_eq!(
            serial_to_date(44927),
            NaiveDate::from_ymd_opt(2023, 1, 1)
        );
    }

    #[test]
    fn serial_text_renders_display_format() {
        assert_eq!(serial_text_to_display("44927"), "01.01.2023");
        assert_eq!(serial_text_to_display(" 44927 "), "01.01.2023");
    }

    #[test]
    fn non_numeric_serial_falls_back_to_raw() {
        assert_eq!(serial_text_to_display("15.02.2025"), "15.02.2025");
        assert_eq!(serial_text_to_display("44927.5"), "44927.5");
        assert_eq!(serial_text_to_display(""), "");
    }

    #[test]
    fn store_timestamps_render_display_format() {
        assert_eq!(
            store_timestamp_to_display("2024-01-15 10:30:00"),
            "15.01.2024"
        );
        assert_eq!(store_timestamp_to_display("2024-01-15"), "15.01.2024");
    }

    #[test]
    fn unparsable_store_timestamp_falls_back_to_raw() {
        assert_eq!(store_timestamp_to_display("вчера"), "вчера");
        assert_eq!(store_timestamp_to_display(""), "");
    }
}
