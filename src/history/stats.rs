//! Aggregate delivery statistics over the history store

use std::collections::HashMap;

use serde::Serialize;

use crate::notification::{DeliveryStatus, NotificationRecord};

/// Event types broken out in `by_type`. Anything else only counts toward
/// the totals.
pub const KNOWN_EVENT_TYPES: [&str; 5] = [
    "application-status",
    "interview-scheduled",
    "interview-reminder",
    "offer-letter",
    "rejection",
];

/// Aggregate counters over recorded delivery attempts.
///
/// `sent` counts records whose status is sent or better (delivered);
/// delivered records are not broken out separately.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationStats {
    pub total: u64,
    pub sent: u64,
    pub failed: u64,
    pub pending: u64,
    pub by_type: HashMap<String, u64>,
    /// Percentage of attempts sent or better, one decimal place,
    /// 0.0 when there are no attempts
    pub delivery_rate: f64,
}

/// Compute aggregate stats over a set of records
pub fn aggregate(records: &[NotificationRecord]) -> NotificationStats {
    let mut by_type: HashMap<String, u64> = KNOWN_EVENT_TYPES
        .iter()
        .map(|t| (t.to_string(), 0))
        .collect();

    let mut sent = 0u64;
    let mut failed = 0u64;
    let mut pending = 0u64;

    for record in records {
        match record.status {
            DeliveryStatus::Sent | DeliveryStatus::Delivered => sent += 1,
            DeliveryStatus::Failed => failed += 1,
            DeliveryStatus::Pending => pending += 1,
        }

        if let Some(count) = by_type.get_mut(record.event_type.as_str()) {
            *count += 1;
        }
    }

    let total = records.len() as u64;
    let delivery_rate = if total == 0 {
        0.0
    } else {
        (100.0 * sent as f64 / total as f64 * 10.0).round() / 10.0
    };

    NotificationStats {
        total,
        sent,
        failed,
        pending,
        by_type,
        delivery_rate,
    }
}
