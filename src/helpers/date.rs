//! Date helper functions

use chrono::{Local, NaiveDate};

/// Format a `YYYY-MM-DD` date using a Moment.js-compatible format string.
/// Anything that does not parse as a calendar date is returned unchanged.
///
/// # Examples
/// ```
/// use folio::helpers::format_display_date;
/// assert_eq!(format_display_date("2025-12-19", "MMM DD, YYYY"), "Dec 19, 2025");
/// assert_eq!(format_display_date("someday", "MMM DD, YYYY"), "someday");
/// ```
pub fn format_display_date(iso: &str, format: &str) -> String {
    match NaiveDate::parse_from_str(iso.trim(), "%Y-%m-%d") {
        Ok(date) => date.format(&moment_to_chrono_format(format)).to_string(),
        Err(_) => iso.to_string(),
    }
}

/// Today's date as `YYYY-MM-DD`
pub fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    // Longest tokens first within each category
    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("DDDD", "%j"),
        ("DD", "%d"),
        ("dddd", "%A"),
        ("ddd", "%a"),
    ];

    let mut result = format.to_string();

    for (from, to) in replacements {
        result = result.replace(from, to);
    }

    result
}
