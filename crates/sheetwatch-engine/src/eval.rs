//! Rule evaluation against current metric readings.
//!
//! One evaluation pass walks the config table in row order, resolves each
//! rule against the readings index, and collects the alerts that fired.
//! Every degenerate row is a silent skip with a logged [`SkipReason`];
//! nothing in here is a fatal error.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sheetwatch_tables::{Record, Table};
use tracing::{debug, info};

use crate::parse::parse_percent;
use crate::rule::{AlertRule, Direction, SkipReason};

/// Reading column holding the current period label.
pub const PERIOD_COLUMN: &str = "Current Month";
/// Reading column holding the current period's value.
pub const CURRENT_VALUE_COLUMN: &str = "Current Month Value";
/// Reading column holding the metric key.
pub const METRIC_COLUMN: &str = "Metric";

/// One current metric row: a `Metric` key plus arbitrary named check
/// columns holding display strings.
///
/// Readings are rebuilt fresh each run and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricReading {
    metric: String,
    record: Record,
}

impl MetricReading {
    /// Builds a reading from a record, or `None` when the metric key is blank.
    #[must_use]
    pub fn from_record(record: Record) -> Option<Self> {
        let metric = record.get_trimmed(METRIC_COLUMN);
        if metric.is_empty() {
            return None;
        }
        Some(Self {
            metric: metric.to_string(),
            record,
        })
    }

    /// The metric key.
    #[must_use]
    pub fn metric(&self) -> &str {
        &self.metric
    }

    /// The raw value of a check column, if that column is present at all.
    ///
    /// Distinguishes "column missing" (`None`, e.g. header drift like
    /// `"v MoM"` vs `"v MoM "`) from "column present but blank".
    #[must_use]
    pub fn check_value(&self, check: &str) -> Option<&str> {
        self.record.get(check)
    }

    /// The current period label, or `""` if the column is absent.
    #[must_use]
    pub fn period(&self) -> &str {
        self.record.get(PERIOD_COLUMN).unwrap_or("")
    }

    /// The current period's value, or `""` if the column is absent.
    #[must_use]
    pub fn current_value(&self) -> &str {
        self.record.get(CURRENT_VALUE_COLUMN).unwrap_or("")
    }
}

/// Readings indexed by metric key. Last row wins on duplicate keys.
#[derive(Debug, Default)]
pub struct ReadingIndex {
    by_metric: HashMap<String, MetricReading>,
}

impl ReadingIndex {
    /// Indexes a readings table, dropping blank rows and rows without a
    /// metric key.
    #[must_use]
    pub fn from_table(table: &Table) -> Self {
        let mut by_metric = HashMap::new();
        for record in table.records() {
            if let Some(reading) = MetricReading::from_record(record) {
                by_metric.insert(reading.metric().to_string(), reading);
            }
        }
        Self { by_metric }
    }

    /// Looks up the reading for a metric key.
    #[must_use]
    pub fn get(&self, metric: &str) -> Option<&MetricReading> {
        self.by_metric.get(metric)
    }

    /// Number of indexed readings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_metric.len()
    }

    /// Returns true if no readings were indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_metric.is_empty()
    }
}

/// A rule that fired against a reading, with everything the notification
/// path needs snapshotted at evaluation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggeredAlert {
    /// The metric the rule watched.
    pub metric: String,
    /// The check column that was compared.
    pub check: String,
    /// The observed value, in percentage units.
    pub value_pct: f64,
    /// The rule's threshold.
    pub threshold: f64,
    /// The rule's comparison direction.
    pub direction: Direction,
    /// Addresses to notify.
    pub recipients: Vec<String>,
    /// The reading's period label at evaluation time.
    pub period: String,
    /// The reading's current value at evaluation time.
    pub current_value: String,
}

/// The outcome of evaluating one config row.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleOutcome {
    /// The rule resolved and fired.
    Triggered(TriggeredAlert),
    /// The rule resolved but did not fire.
    Quiet,
    /// The row could not be evaluated and was dropped.
    Skipped(SkipReason),
}

/// The result of one full evaluation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    /// Alerts that fired, in config-table order.
    pub triggered: Vec<TriggeredAlert>,
    /// Number of config rows considered (blank rows excluded).
    pub rules_seen: usize,
    /// The reasons rows were dropped, in row order.
    pub skipped: Vec<SkipReason>,
}

impl Evaluation {
    /// Returns true if nothing fired.
    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.triggered.is_empty()
    }

    /// Number of rows dropped.
    #[must_use]
    pub fn skip_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Evaluates one config row against the readings index.
#[must_use]
pub fn evaluate_rule(record: &Record, readings: &ReadingIndex) -> RuleOutcome {
    let rule = match AlertRule::from_record(record) {
        Ok(rule) => rule,
        Err(reason) => return RuleOutcome::Skipped(reason),
    };

    let Some(reading) = readings.get(&rule.metric) else {
        return RuleOutcome::Skipped(SkipReason::UnknownMetric);
    };

    let Some(raw_value) = reading.check_value(&rule.check) else {
        return RuleOutcome::Skipped(SkipReason::UnknownCheckColumn);
    };

    let Ok(value_pct) = parse_percent(raw_value) else {
        return RuleOutcome::Skipped(SkipReason::BadValue);
    };

    if rule.direction.should_trigger(value_pct, rule.threshold) {
        RuleOutcome::Triggered(TriggeredAlert {
            metric: rule.metric,
            check: rule.check,
            value_pct,
            threshold: rule.threshold,
            direction: rule.direction,
            recipients: rule.recipients,
            period: reading.period().to_string(),
            current_value: reading.current_value().to_string(),
        })
    } else {
        RuleOutcome::Quiet
    }
}

/// Evaluates every rule row against the readings table, in table order.
///
/// Deterministic: identical inputs produce an identical triggered list.
#[must_use]
pub fn evaluate(readings_table: &Table, rules_table: &Table) -> Evaluation {
    let readings = ReadingIndex::from_table(readings_table);
    debug!(
        readings = readings.len(),
        table = %readings_table.name,
        "indexed metric readings"
    );

    let mut result = Evaluation::default();
    for (row, record) in rules_table.records().iter().enumerate() {
        result.rules_seen += 1;
        match evaluate_rule(record, &readings) {
            RuleOutcome::Triggered(alert) => {
                debug!(
                    row,
                    metric = %alert.metric,
                    check = %alert.check,
                    value_pct = alert.value_pct,
                    threshold = alert.threshold,
                    direction = %alert.direction,
                    "rule triggered"
                );
                result.triggered.push(alert);
            }
            RuleOutcome::Quiet => {}
            RuleOutcome::Skipped(reason) => {
                debug!(row, %reason, "skipped rule row");
                result.skipped.push(reason);
            }
        }
    }

    info!(
        rules = result.rules_seen,
        triggered = result.triggered.len(),
        skipped = result.skip_count(),
        "evaluation pass complete"
    );
    result
}
