//! Grouping triggered alerts by recipient.
//!
//! Each recipient gets exactly one consolidated message per run, so the
//! triggered list is regrouped into per-recipient batches before rendering.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::eval::TriggeredAlert;

/// All alerts destined for one recipient in a single run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipientBatch {
    /// The recipient address.
    pub recipient: String,
    /// The alerts naming this recipient, in trigger order.
    pub alerts: Vec<TriggeredAlert>,
}

impl RecipientBatch {
    /// Number of alerts in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    /// Returns true if the batch holds no alerts. Grouping never produces
    /// an empty batch, but downstream code should not rely on that.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}

/// Groups triggered alerts into per-recipient batches.
///
/// Batches are ordered by each recipient's first appearance; within a
/// batch, alerts keep their trigger order. An alert naming N recipients
/// lands in N batches. Identical alerts are not deduplicated (duplicates
/// only arise from legitimately distinct rules). Grouping is lossless:
/// flattening every batch, one copy per recipient per alert, reproduces
/// the input multiset.
#[must_use]
pub fn group_by_recipient(alerts: &[TriggeredAlert]) -> Vec<RecipientBatch> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut batches: Vec<RecipientBatch> = Vec::new();

    for alert in alerts {
        for recipient in &alert.recipients {
            let slot = *index.entry(recipient.clone()).or_insert_with(|| {
                batches.push(RecipientBatch {
                    recipient: recipient.clone(),
                    alerts: Vec::new(),
                });
                batches.len() - 1
            });
            batches[slot].alerts.push(alert.clone());
        }
    }

    batches
}
