//! Shared utility functions.

use crate::{DashboardError, Result};
use chrono::NaiveDate;

/// Date format used by the input file and the query string.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses an ISO `YYYY-MM-DD` date, naming `field` in the error.
pub fn parse_iso_date(input: &str, field: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), ISO_DATE_FORMAT).map_err(|e| {
        DashboardError::validation_field(format!("'{input}' is not a YYYY-MM-DD date: {e}"), field)
    })
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Parses a `#RRGGBB` color into its components.
pub fn parse_hex_color(input: &str) -> Option<(u8, u8, u8)> {
    let hex = input.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    Some((
        u8::from_str_radix(&hex[0..2], 16).ok()?,
        u8::from_str_radix(&hex[2..4], 16).ok()?,
        u8::from_str_radix(&hex[4..6], 16).ok()?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_date() {
        let date = parse_iso_date("2011-01-01", "start").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2011, 1, 1).unwrap());

        let padded = parse_iso_date(" 2012-12-31 ", "end").unwrap();
        assert_eq!(format_iso_date(padded), "2012-12-31");
    }

    #[test]
    fn test_parse_iso_date_rejects_garbage() {
        let error = parse_iso_date("01/02/2011", "start").unwrap_err();
        match error {
            DashboardError::Validation { field, .. } => assert_eq!(field.as_deref(), Some("start")),
            other => panic!("Expected validation error, got {other:?}"),
        }
        assert!(parse_iso_date("2011-02-30", "end").is_err());
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#E66F4E"), Some((0xE6, 0x6F, 0x4E)));
        assert_eq!(parse_hex_color("#e8c567"), Some((0xE8, 0xC5, 0x67)));
        assert_eq!(parse_hex_color("E66F4E"), None);
        assert_eq!(parse_hex_color("#ZZ0000"), None);
        assert_eq!(parse_hex_color("#FFF"), None);
    }
}
