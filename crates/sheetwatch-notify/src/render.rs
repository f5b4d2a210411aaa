//! Rendering a recipient's alert batch into message bodies.
//!
//! Rendering is pure: given a batch, a timestamp string, and a subject
//! prefix it always produces the same output, and it performs no I/O.
//! Three representations come out of one batch: a plain-text body, an
//! HTML table body, and the compact one-line summary the audit row keeps.

use serde::{Deserialize, Serialize};
use sheetwatch_engine::{RecipientBatch, TriggeredAlert};

/// A fully rendered message for one recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedMessage {
    /// Subject line, embedding the batch size.
    pub subject: String,
    /// Plain-text body.
    pub text_body: String,
    /// HTML body (presentation only; the text body is complete on its own).
    pub html_body: String,
    /// Compact per-alert summary for the audit row.
    pub summary: String,
}

/// Renders one recipient batch.
#[must_use]
pub fn render_message(
    batch: &RecipientBatch,
    triggered_at: &str,
    subject_prefix: &str,
) -> RenderedMessage {
    RenderedMessage {
        subject: render_subject(subject_prefix, batch.len()),
        text_body: render_text(batch, triggered_at),
        html_body: render_html(batch, triggered_at),
        summary: render_summary(batch),
    }
}

/// Builds the subject line: `"{prefix} {n} trigger(s) detected"`.
#[must_use]
pub fn render_subject(prefix: &str, count: usize) -> String {
    format!("{prefix} {count} trigger(s) detected")
}

fn alert_line(alert: &TriggeredAlert) -> String {
    format!(
        "- {} ({}): {} = {:.2}% (rule: {} {:.2}%), Current Value = {}",
        alert.metric,
        alert.period,
        alert.check,
        alert.value_pct,
        alert.direction,
        alert.threshold,
        alert.current_value,
    )
}

fn render_text(batch: &RecipientBatch, triggered_at: &str) -> String {
    let mut lines = vec![
        format!("Triggered at: {triggered_at}"),
        String::new(),
        "The following metric checks exceeded thresholds:".to_string(),
        String::new(),
    ];
    lines.extend(batch.alerts.iter().map(alert_line));
    lines.join("\n")
}

fn render_html(batch: &RecipientBatch, triggered_at: &str) -> String {
    let mut lines = vec![
        "<h2 style='font-family:Arial;'>📊 Metric Alert</h2>".to_string(),
        format!("<p><strong>Triggered at:</strong> {triggered_at}</p>"),
        "<table border='1' cellpadding='8' cellspacing='0' \
         style='border-collapse: collapse; font-family:Arial;'>"
            .to_string(),
        "<tr style='background-color:#f2f2f2;'>\
         <th>Metric</th><th>Month</th><th>Check</th><th>Value</th><th>Rule</th></tr>"
            .to_string(),
    ];

    for alert in &batch.alerts {
        // Polarity marker: negative values render red, the rest green.
        let color = if alert.value_pct < 0.0 { "red" } else { "green" };
        lines.push(format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td>\
             <td style='color:{color}; font-weight:bold;'>{:.2}%</td>\
             <td>{} {:.2}%</td></tr>",
            alert.metric, alert.period, alert.check, alert.value_pct, alert.direction,
            alert.threshold,
        ));
    }

    lines.push("</table>".to_string());
    lines.join("\n")
}

/// Builds the compact trigger summary stored on the audit row:
/// one `{metric} {check}={value}% (rule: {direction} {threshold}%)` entry
/// per alert, joined by `"; "`.
#[must_use]
pub fn render_summary(batch: &RecipientBatch) -> String {
    batch
        .alerts
        .iter()
        .map(|a| {
            format!(
                "{} {}={:.2}% (rule: {} {:.2}%)",
                a.metric, a.check, a.value_pct, a.direction, a.threshold
            )
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetwatch_engine::Direction;

    fn alert(metric: &str, value_pct: f64) -> TriggeredAlert {
        TriggeredAlert {
            metric: metric.to_string(),
            check: "v MoM".to_string(),
            value_pct,
            threshold: 5.0,
            direction: Direction::Above,
            recipients: vec!["a@x.com".to_string()],
            period: "June".to_string(),
            current_value: "120000".to_string(),
        }
    }

    fn batch(alerts: Vec<TriggeredAlert>) -> RecipientBatch {
        RecipientBatch {
            recipient: "a@x.com".to_string(),
            alerts,
        }
    }

    #[test]
    fn subject_embeds_batch_size() {
        assert_eq!(
            render_subject("[Metric Alert]", 2),
            "[Metric Alert] 2 trigger(s) detected"
        );
    }

    #[test]
    fn text_body_has_header_and_one_line_per_alert() {
        let msg = render_message(
            &batch(vec![alert("Revenue", 6.5), alert("Churn", -9.0)]),
            "2026-06-30 09:00:00",
            "[Metric Alert]",
        );

        assert!(msg.text_body.starts_with("Triggered at: 2026-06-30 09:00:00"));
        assert!(msg.text_body.contains(
            "- Revenue (June): v MoM = 6.50% (rule: above 5.00%), Current Value = 120000"
        ));
        assert!(msg.text_body.contains(
            "- Churn (June): v MoM = -9.00% (rule: above 5.00%), Current Value = 120000"
        ));
    }

    #[test]
    fn values_are_fixed_to_two_decimals() {
        let msg = render_message(
            &batch(vec![alert("Revenue", 6.125)]),
            "now",
            "[Metric Alert]",
        );
        assert!(msg.text_body.contains("6.13%") || msg.text_body.contains("6.12%"));
        assert!(!msg.text_body.contains("6.125"));
    }

    #[test]
    fn html_marks_polarity() {
        let msg = render_message(
            &batch(vec![alert("Revenue", 6.5), alert("Churn", -9.0)]),
            "now",
            "[Metric Alert]",
        );
        assert!(msg.html_body.contains("color:green"));
        assert!(msg.html_body.contains("color:red"));
        assert!(msg.html_body.contains("<th>Metric</th>"));
    }

    #[test]
    fn summary_joins_alerts_with_semicolons() {
        let summary = render_summary(&batch(vec![alert("Revenue", 6.5), alert("Churn", -9.0)]));
        assert_eq!(
            summary,
            "Revenue v MoM=6.50% (rule: above 5.00%); Churn v MoM=-9.00% (rule: above 5.00%)"
        );
    }

    #[test]
    fn rendering_is_deterministic() {
        let b = batch(vec![alert("Revenue", 6.5)]);
        let first = render_message(&b, "ts", "[Metric Alert]");
        let second = render_message(&b, "ts", "[Metric Alert]");
        assert_eq!(first, second);
    }
}
