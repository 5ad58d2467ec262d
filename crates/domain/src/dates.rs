//! Canonical date handling.
//!
//! Every screen that displays, compares, or submits a date routes through
//! this module; nothing else in the workspace parses date strings.

use chrono::NaiveDate;

const CANONICAL_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// Formats accepted by the generic-parse fallback, tried in order.
const FALLBACK_FORMATS: &[&str] = &["%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y"];

/// Canonicalizes an arbitrary date representation to `YYYY-MM-DD`.
///
/// Returns the empty string for empty or unparseable input; never errors.
/// Date-time input (anything containing a `T` separator) keeps the calendar
/// day as written in the timestamp, with no timezone conversion. Normalizing
/// an already-canonical string is a no-op.
#[must_use]
pub fn normalize(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    if let Some((day, _)) = trimmed.split_once('T') {
        return NaiveDate::parse_from_str(day, CANONICAL_FORMAT)
            .map(|date| date.format(CANONICAL_FORMAT).to_string())
            .unwrap_or_default();
    }

    if parse_canonical(trimmed).is_some() {
        return trimmed.to_owned();
    }

    FALLBACK_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .map(|date| date.format(CANONICAL_FORMAT).to_string())
        .unwrap_or_default()
}

/// Parses a strictly canonical `YYYY-MM-DD` string into a date.
///
/// Returns `None` for any other shape, including unpadded components.
#[must_use]
pub fn parse_canonical(input: &str) -> Option<NaiveDate> {
    let bytes = input.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }

    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(index, byte)| matches!(index, 4 | 7) || byte.is_ascii_digit());
    if !digits_ok {
        return None;
    }

    NaiveDate::parse_from_str(input, CANONICAL_FORMAT).ok()
}

/// Renders a normalizable date as `DD/MM/YYYY` for day-detail titles.
///
/// Returns the empty string when the input does not normalize.
#[must_use]
pub fn display(input: &str) -> String {
    let canonical = normalize(input);
    parse_canonical(&canonical)
        .map(|date| date.format(DISPLAY_FORMAT).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{display, normalize, parse_canonical};

    #[test]
    fn empty_input_normalizes_to_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn canonical_input_is_a_fixed_point() {
        assert_eq!(normalize("2024-03-05"), "2024-03-05");
        assert_eq!(normalize(&normalize("2024-03-05")), "2024-03-05");
    }

    #[test]
    fn datetime_input_keeps_the_day_as_written() {
        assert_eq!(normalize("2024-03-05T10:00:00Z"), "2024-03-05");
        assert_eq!(normalize("2024-03-05T23:30:00-05:00"), "2024-03-05");
        assert_eq!(normalize("2024-03-05T00:10:00+14:00"), "2024-03-05");
    }

    #[test]
    fn generic_formats_are_canonicalized() {
        assert_eq!(normalize("2024/03/05"), "2024-03-05");
        assert_eq!(normalize("05/03/2024"), "2024-03-05");
        assert_eq!(normalize("05-03-2024"), "2024-03-05");
    }

    #[test]
    fn unparseable_input_normalizes_to_empty() {
        assert_eq!(normalize("not a date"), "");
        assert_eq!(normalize("2024-99-99"), "");
        assert_eq!(normalize("garbageTmore"), "");
    }

    #[test]
    fn output_is_empty_or_canonical() {
        let samples = [
            "",
            "2024-03-05",
            "2024-03-05T10:00:00Z",
            "05/03/2024",
            "gibberish",
            "2024-13-01",
        ];
        for sample in samples {
            let normalized = normalize(sample);
            assert!(
                normalized.is_empty() || parse_canonical(&normalized).is_some(),
                "unexpected normalization of {sample:?}: {normalized:?}"
            );
        }
    }

    #[test]
    fn display_renders_day_month_year() {
        assert_eq!(display("2024-03-05"), "05/03/2024");
        assert_eq!(display("2024-03-05T10:00:00Z"), "05/03/2024");
        assert_eq!(display("junk"), "");
    }
}
