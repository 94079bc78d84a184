//! Date formatting for table cells.

use chrono::NaiveDate;

/// Format an ISO date (with or without a time part) as DD/MM/YYYY.
/// Example: "2025-03-29" or "2025-03-29T00:00:00Z" -> "29/03/2025"
///
/// Anything that does not parse as a date is returned untouched so a broken
/// cell still shows its raw value.
pub fn format_remito_date(value: &str) -> String {
    let date_part = value.split('T').next().unwrap_or(value);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => date.format("%d/%m/%Y").to_string(),
        Err(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_iso_dates() {
        assert_eq!(format_remito_date("2025-03-29"), "29/03/2025");
        assert_eq!(format_remito_date("2024-12-01T14:02:26Z"), "01/12/2024");
    }

    #[test]
    fn non_dates_pass_through() {
        assert_eq!(format_remito_date(""), "");
        assert_eq!(format_remito_date("R-0001"), "R-0001");
        assert_eq!(format_remito_date("2025-13-99"), "2025-13-99");
    }
}
