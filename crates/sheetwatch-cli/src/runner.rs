//! The alert run itself.
//!
//! One run: fetch both input tables, evaluate the rules, group the alerts
//! that fired by recipient, then walk the batches one at a time rendering,
//! delivering, and auditing. Recipients are processed sequentially and
//! independently; a failed delivery or audit append is logged and the run
//! moves on to the next batch.

use std::io::Write;

use chrono::Local;
use sheetwatch_audit::{AuditRecord, AuditSink};
use sheetwatch_engine::{evaluate, group_by_recipient};
use sheetwatch_notify::{MessageChannel, OutboundMessage, render_message};
use sheetwatch_tables::TableSource;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::RunConfig;
use crate::error::Result;

/// Counters summarizing one completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// The run identifier shared by all audit rows of this run.
    pub run_id: String,
    /// Alerts that fired, across all recipients.
    pub triggered: usize,
    /// Rule rows dropped as unevaluable.
    pub skipped: usize,
    /// Recipient batches produced.
    pub recipients: usize,
    /// Messages accepted by the channel.
    pub sent: usize,
    /// Deliveries the channel rejected.
    pub send_failures: usize,
    /// Audit rows written.
    pub audited: usize,
    /// Audit appends that failed.
    pub audit_failures: usize,
}

impl RunReport {
    /// Returns true if no rule fired.
    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.triggered == 0
    }
}

/// Executes one alert run end to end.
///
/// # Errors
///
/// Returns an error only for run-tier failures: an input table that cannot
/// be fetched, a missing audit table when auditing is enabled, or output
/// that cannot be written. Recipient-tier failures are counted on the
/// report instead.
pub fn run_alerts(
    out: &mut dyn Write,
    source: &dyn TableSource,
    channel: &dyn MessageChannel,
    sink: &dyn AuditSink,
    config: &RunConfig,
) -> Result<RunReport> {
    let run_id = Uuid::new_v4().to_string();
    info!(
        %run_id,
        metrics_table = %config.metrics_table,
        rules_table = %config.rules_table,
        dry_run = config.dry_run,
        "starting alert run"
    );

    let readings = source.fetch(&config.metrics_table)?;
    let rules = source.fetch(&config.rules_table)?;
    if config.audit_enabled {
        // The audit table must exist before anything goes out; a trail that
        // cannot be written is a setup failure, not a per-recipient one.
        source.fetch(&config.audit_table)?;
    }

    let evaluation = evaluate(&readings, &rules);
    let mut report = RunReport {
        run_id: run_id.clone(),
        triggered: evaluation.triggered.len(),
        skipped: evaluation.skip_count(),
        ..RunReport::default()
    };

    if evaluation.is_quiet() {
        writeln!(out, "No alerts triggered.")?;
        info!(%run_id, rules = evaluation.rules_seen, "no alerts triggered");
        return Ok(report);
    }

    let batches = group_by_recipient(&evaluation.triggered);
    report.recipients = batches.len();

    let now = Local::now();
    let triggered_at = now.format("%Y-%m-%d %H:%M:%S").to_string();
    let audit_timestamp = now.format("%Y-%m-%dT%H:%M:%S").to_string();

    for batch in &batches {
        let rendered = render_message(batch, &triggered_at, &config.subject_prefix);

        if config.dry_run {
            writeln!(out, "--- {} ---", batch.recipient)?;
            writeln!(out, "Subject: {}", rendered.subject)?;
            writeln!(out, "{}", rendered.text_body)?;
            writeln!(out)?;
            continue;
        }

        if config.send_enabled {
            let message = OutboundMessage {
                to: batch.recipient.clone(),
                subject: rendered.subject.clone(),
                text_body: rendered.text_body.clone(),
                html_body: rendered.html_body.clone(),
            };
            match channel.send(&message) {
                Ok(receipt) => {
                    info!(
                        %run_id,
                        recipient = %batch.recipient,
                        channel = %receipt.channel,
                        alerts = batch.len(),
                        "message sent"
                    );
                    report.sent += 1;
                }
                Err(e) => {
                    // No audit row for a message that never went out.
                    warn!(%run_id, recipient = %batch.recipient, error = %e, "delivery failed");
                    report.send_failures += 1;
                    continue;
                }
            }
        } else {
            info!(%run_id, recipient = %batch.recipient, "delivery suppressed");
        }

        if config.audit_enabled {
            let record = AuditRecord {
                timestamp: audit_timestamp.clone(),
                run_id: run_id.clone(),
                recipient: batch.recipient.clone(),
                subject: rendered.subject.clone(),
                trigger_count: batch.len(),
                summary: rendered.summary.clone(),
                body: rendered.text_body.clone(),
                source_id: source.source_id().to_string(),
                metrics_table: config.metrics_table.clone(),
                rules_table: config.rules_table.clone(),
            };
            match sink.append(&record) {
                Ok(()) => report.audited += 1,
                Err(e) => {
                    warn!(%run_id, recipient = %batch.recipient, error = %e, "audit append failed");
                    report.audit_failures += 1;
                }
            }
        }
    }

    info!(
        %run_id,
        triggered = report.triggered,
        recipients = report.recipients,
        sent = report.sent,
        send_failures = report.send_failures,
        audited = report.audited,
        audit_failures = report.audit_failures,
        "alert run complete"
    );
    Ok(report)
}
