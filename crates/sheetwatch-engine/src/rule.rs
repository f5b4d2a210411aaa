//! Threshold rules.
//!
//! One rule ties a metric to a named check column, a comparison
//! [`Direction`], a percentage threshold, and the recipients to notify.
//! Rule rows come out of the config table as loose display strings; the
//! validation pipeline here turns each row into either a typed
//! [`AlertRule`] or a [`SkipReason`] explaining why it was dropped.

use std::fmt;

use serde::{Deserialize, Serialize};
use sheetwatch_tables::Record;

use crate::error::{EngineError, Result};
use crate::parse::{parse_bool, parse_recipients};

/// Comparison direction for a threshold rule, over percentage values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Fires when the value is at or above the threshold.
    Above,
    /// Fires when the value is at or below the negated threshold.
    Below,
    /// Fires when the magnitude of the value reaches the threshold.
    Abs,
}

impl Direction {
    /// Parses a direction cell, case-insensitively, ignoring surrounding
    /// whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownDirection`] for any other text.
    pub fn parse(text: &str) -> Result<Self> {
        match text.trim().to_lowercase().as_str() {
            "above" => Ok(Self::Above),
            "below" => Ok(Self::Below),
            "abs" => Ok(Self::Abs),
            _ => Err(EngineError::UnknownDirection {
                text: text.to_string(),
            }),
        }
    }

    /// Decides whether a rule with this direction fires.
    ///
    /// `threshold` is expected to be non-negative; behavior for a negative
    /// threshold is unspecified and deliberately not special-cased.
    #[must_use]
    pub fn should_trigger(self, value_pct: f64, threshold: f64) -> bool {
        match self {
            Self::Above => value_pct >= threshold,
            Self::Below => value_pct <= -threshold,
            Self::Abs => value_pct.abs() >= threshold,
        }
    }

    /// Returns the direction as its config-table spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Above => "above",
            Self::Below => "below",
            Self::Abs => "abs",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a config row was dropped instead of evaluated.
///
/// Every variant is a silent, logged no-op at run level; none of them is
/// an error to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The row's `Enabled` cell was not truthy.
    Disabled,
    /// A required column was blank or absent (named by its header).
    MissingField(&'static str),
    /// The rule's metric has no row in the current readings.
    UnknownMetric,
    /// The threshold cell did not parse as a number.
    BadThreshold,
    /// The direction cell was not `above`, `below`, or `abs`.
    UnknownDirection,
    /// The rule's check column is not present on the matched reading.
    UnknownCheckColumn,
    /// The reading's value at the check column did not parse as a percent.
    BadValue,
}

impl SkipReason {
    /// A short machine-friendly tag for diagnostics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::MissingField(_) => "missing_field",
            Self::UnknownMetric => "unknown_metric",
            Self::BadThreshold => "bad_threshold",
            Self::UnknownDirection => "unknown_direction",
            Self::UnknownCheckColumn => "unknown_check_column",
            Self::BadValue => "bad_value",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "missing_field({field})"),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

/// A validated threshold rule.
///
/// Only rows that are enabled and fully populated become rules; resolution
/// against the current readings (metric key, check column, value text)
/// happens later, in the evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRule {
    /// The metric key this rule watches.
    pub metric: String,
    /// The reading column holding the value to compare.
    pub check: String,
    /// Comparison direction.
    pub direction: Direction,
    /// Threshold, in percentage units. Expected non-negative.
    pub threshold: f64,
    /// Addresses to notify when the rule fires. Never empty.
    pub recipients: Vec<String>,
}

impl AlertRule {
    /// Validates one config-table record into a rule.
    ///
    /// Checks run in order: enabled, required fields present, threshold
    /// numeric, direction recognized. The first failure wins.
    ///
    /// # Errors
    ///
    /// Returns the [`SkipReason`] describing why the row cannot be a rule.
    pub fn from_record(record: &Record) -> std::result::Result<Self, SkipReason> {
        if !parse_bool(record.get_trimmed("Enabled")) {
            return Err(SkipReason::Disabled);
        }

        let metric = record.get_trimmed("Metric");
        let check = record.get_trimmed("Check");
        let direction_raw = record.get_trimmed("Direction");
        let recipients = parse_recipients(record.get("Recipients").unwrap_or(""));
        let threshold_raw = record.get_trimmed("Threshold Pct");

        if metric.is_empty() {
            return Err(SkipReason::MissingField("Metric"));
        }
        if check.is_empty() {
            return Err(SkipReason::MissingField("Check"));
        }
        if direction_raw.is_empty() {
            return Err(SkipReason::MissingField("Direction"));
        }
        if recipients.is_empty() {
            return Err(SkipReason::MissingField("Recipients"));
        }
        if threshold_raw.is_empty() {
            return Err(SkipReason::MissingField("Threshold Pct"));
        }

        let threshold: f64 = threshold_raw
            .parse()
            .map_err(|_| SkipReason::BadThreshold)?;
        let direction =
            Direction::parse(direction_raw).map_err(|_| SkipReason::UnknownDirection)?;

        Ok(Self {
            metric: metric.to_string(),
            check: check.to_string(),
            direction,
            threshold,
            recipients,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(cells: &[(&str, &str)]) -> Record {
        let headers: Vec<String> = cells.iter().map(|(h, _)| (*h).to_string()).collect();
        let row: Vec<String> = cells.iter().map(|(_, v)| (*v).to_string()).collect();
        Record::from_row(&headers, &row)
    }

    fn valid_row() -> Record {
        record(&[
            ("Enabled", "TRUE"),
            ("Metric", "Revenue"),
            ("Check", "v MoM"),
            ("Direction", "above"),
            ("Recipients", "a@x.com"),
            ("Threshold Pct", "5"),
        ])
    }

    mod direction_tests {
        use super::*;
        use test_case::test_case;

        #[test_case("above", Direction::Above)]
        #[test_case("Below", Direction::Below)]
        #[test_case(" ABS ", Direction::Abs)]
        fn parses_case_insensitively(text: &str, expected: Direction) {
            assert_eq!(Direction::parse(text).unwrap(), expected);
        }

        #[test]
        fn rejects_unknown_text() {
            assert!(matches!(
                Direction::parse("sideways"),
                Err(EngineError::UnknownDirection { .. })
            ));
            assert!(Direction::parse("").is_err());
        }

        #[test_case(5.0, 4.0, Direction::Above, true; "above fires at or over")]
        #[test_case(4.0, 4.0, Direction::Above, true; "above fires at exactly")]
        #[test_case(-5.0, 4.0, Direction::Above, false; "above ignores negatives")]
        #[test_case(-5.0, 4.0, Direction::Below, true; "below fires under negated")]
        #[test_case(-4.0, 4.0, Direction::Below, true; "below fires at negated")]
        #[test_case(6.5, 5.0, Direction::Below, false; "below ignores positives")]
        #[test_case(-5.0, 4.0, Direction::Abs, true; "abs fires on magnitude")]
        #[test_case(3.0, 4.0, Direction::Abs, false; "abs under threshold")]
        fn should_trigger_matrix(value: f64, threshold: f64, direction: Direction, fires: bool) {
            assert_eq!(direction.should_trigger(value, threshold), fires);
        }

        #[test]
        fn display_matches_config_spelling() {
            assert_eq!(format!("{}", Direction::Above), "above");
            assert_eq!(format!("{}", Direction::Below), "below");
            assert_eq!(format!("{}", Direction::Abs), "abs");
        }
    }

    mod skip_reason_tests {
        use super::*;

        #[test]
        fn display_includes_missing_field_name() {
            assert_eq!(
                format!("{}", SkipReason::MissingField("Threshold Pct")),
                "missing_field(Threshold Pct)"
            );
            assert_eq!(format!("{}", SkipReason::Disabled), "disabled");
        }
    }

    mod rule_tests {
        use super::*;
        use test_case::test_case;

        #[test]
        fn valid_row_becomes_rule() {
            let rule = AlertRule::from_record(&valid_row()).unwrap();
            assert_eq!(rule.metric, "Revenue");
            assert_eq!(rule.check, "v MoM");
            assert_eq!(rule.direction, Direction::Above);
            assert!((rule.threshold - 5.0).abs() < f64::EPSILON);
            assert_eq!(rule.recipients, vec!["a@x.com".to_string()]);
        }

        #[test_case("false"; "explicit false")]
        #[test_case(""; "blank cell")]
        #[test_case("0"; "zero")]
        fn disabled_rows_skip(enabled: &str) {
            let row = record(&[
                ("Enabled", enabled),
                ("Metric", "Revenue"),
                ("Check", "v MoM"),
                ("Direction", "above"),
                ("Recipients", "a@x.com"),
                ("Threshold Pct", "5"),
            ]);
            assert_eq!(AlertRule::from_record(&row), Err(SkipReason::Disabled));
        }

        #[test_case("Metric"; "blank metric")]
        #[test_case("Check"; "blank check")]
        #[test_case("Direction"; "blank direction")]
        #[test_case("Recipients"; "blank recipients")]
        #[test_case("Threshold Pct"; "blank threshold")]
        fn blank_required_field_skips(field: &str) {
            let cells: Vec<(&str, &str)> = [
                ("Enabled", "TRUE"),
                ("Metric", "Revenue"),
                ("Check", "v MoM"),
                ("Direction", "above"),
                ("Recipients", "a@x.com"),
                ("Threshold Pct", "5"),
            ]
            .iter()
            .map(|&(h, v)| (h, if h == field { " " } else { v }))
            .collect();

            let outcome = AlertRule::from_record(&record(&cells));
            assert!(
                matches!(outcome, Err(SkipReason::MissingField(name)) if name == field),
                "expected missing-field skip for {field}, got {outcome:?}"
            );
        }

        #[test]
        fn absent_column_counts_as_missing() {
            let row = record(&[
                ("Enabled", "TRUE"),
                ("Metric", "Revenue"),
                ("Direction", "above"),
                ("Recipients", "a@x.com"),
                ("Threshold Pct", "5"),
            ]);
            assert_eq!(
                AlertRule::from_record(&row),
                Err(SkipReason::MissingField("Check"))
            );
        }

        #[test]
        fn non_numeric_threshold_skips() {
            let row = record(&[
                ("Enabled", "TRUE"),
                ("Metric", "Revenue"),
                ("Check", "v MoM"),
                ("Direction", "above"),
                ("Recipients", "a@x.com"),
                ("Threshold Pct", "five"),
            ]);
            assert_eq!(AlertRule::from_record(&row), Err(SkipReason::BadThreshold));
        }

        #[test]
        fn unknown_direction_skips_not_errors() {
            let row = record(&[
                ("Enabled", "TRUE"),
                ("Metric", "Revenue"),
                ("Check", "v MoM"),
                ("Direction", "sideways"),
                ("Recipients", "a@x.com"),
                ("Threshold Pct", "5"),
            ]);
            assert_eq!(
                AlertRule::from_record(&row),
                Err(SkipReason::UnknownDirection)
            );
        }

        #[test]
        fn multiple_recipients_preserved_in_order() {
            let row = record(&[
                ("Enabled", "yes"),
                ("Metric", "Revenue"),
                ("Check", "v MoM"),
                ("Direction", "abs"),
                ("Recipients", "b@y.com, a@x.com,"),
                ("Threshold Pct", "2.5"),
            ]);
            let rule = AlertRule::from_record(&row).unwrap();
            assert_eq!(
                rule.recipients,
                vec!["b@y.com".to_string(), "a@x.com".to_string()]
            );
        }
    }
}
