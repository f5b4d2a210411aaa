//! Typed parsing of raw cell text.
//!
//! Sheet cells arrive as display strings. These helpers convert them into
//! the three value shapes the engine cares about: percentages, booleans,
//! and recipient lists.

use crate::error::{EngineError, Result};

/// Parses a percentage display string into its numeric value.
///
/// A trailing `%` is stripped if present; the remainder must parse as a
/// decimal number (decimal point only, no locale handling). `"3.2%"` and
/// `"3.2"` both yield `3.2`.
///
/// # Errors
///
/// Returns [`EngineError::BadPercent`] for empty or non-numeric text.
pub fn parse_percent(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    // Cells like "6.5 %" leave whitespace behind once the sign is stripped.
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
    number.parse().map_err(|_| EngineError::BadPercent {
        text: text.to_string(),
    })
}

/// Parses a truthy cell: case-insensitive `true`, `1`, `yes`, or `y`.
///
/// Everything else, including blank text, is `false`. Never fails.
#[must_use]
pub fn parse_bool(text: &str) -> bool {
    matches!(
        text.trim().to_lowercase().as_str(),
        "true" | "1" | "yes" | "y"
    )
}

/// Splits a comma-separated recipient cell into addresses.
///
/// Whitespace around each address is trimmed, empty segments are dropped,
/// order is preserved, and duplicates are kept as-is.
#[must_use]
pub fn parse_recipients(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    mod percent_tests {
        use super::*;
        use test_case::test_case;

        #[test_case("3.2%", 3.2; "with percent sign")]
        #[test_case("3.2", 3.2; "bare number")]
        #[test_case("-5.75%", -5.75; "negative with sign")]
        #[test_case("  6.5% ", 6.5; "surrounding whitespace")]
        #[test_case("6.5 %", 6.5; "space before percent sign")]
        #[test_case("0", 0.0; "zero")]
        fn parses(text: &str, expected: f64) {
            let value = parse_percent(text).unwrap();
            assert!((value - expected).abs() < f64::EPSILON);
        }

        #[test_case(""; "empty")]
        #[test_case("abc"; "non numeric")]
        #[test_case("%"; "bare percent sign")]
        #[test_case("3,2%"; "decimal comma")]
        fn rejects(text: &str) {
            assert!(matches!(
                parse_percent(text),
                Err(EngineError::BadPercent { .. })
            ));
        }
    }

    mod bool_tests {
        use super::*;
        use test_case::test_case;

        #[test_case("true"; "lowercase true")]
        #[test_case("TRUE"; "uppercase true")]
        #[test_case("YES"; "uppercase yes")]
        #[test_case("y"; "single y")]
        #[test_case("1"; "one")]
        #[test_case(" yes "; "whitespace yes")]
        fn truthy(text: &str) {
            assert!(parse_bool(text));
        }

        #[test_case(""; "empty")]
        #[test_case("false"; "explicit false")]
        #[test_case("0"; "zero")]
        #[test_case("no"; "explicit no")]
        #[test_case("enabled"; "unrecognized word")]
        fn falsy(text: &str) {
            assert!(!parse_bool(text));
        }
    }

    mod recipient_tests {
        use super::*;

        #[test]
        fn splits_and_trims() {
            assert_eq!(
                parse_recipients("a@x.com, b@y.com,"),
                vec!["a@x.com".to_string(), "b@y.com".to_string()]
            );
        }

        #[test]
        fn empty_text_yields_no_recipients() {
            assert!(parse_recipients("").is_empty());
            assert!(parse_recipients(" , ,").is_empty());
        }

        #[test]
        fn preserves_order_and_duplicates() {
            assert_eq!(
                parse_recipients("b@y.com,a@x.com,b@y.com"),
                vec![
                    "b@y.com".to_string(),
                    "a@x.com".to_string(),
                    "b@y.com".to_string()
                ]
            );
        }
    }
}
