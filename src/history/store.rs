//! Append-only delivery history.
//!
//! Every delivery attempt is appended with a monotonic sequence number so
//! near-simultaneous sends for one recipient still have a well-defined
//! order. Records are never deleted by this layer; status updates follow
//! the monotonic lifecycle and nothing else mutates a stored record.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::notification::{DeliveryStatus, NotificationRecord};

/// Default number of records returned by a history query
pub const DEFAULT_QUERY_LIMIT: usize = 50;

/// History-specific error type
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Notification not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid status transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: DeliveryStatus,
        to: DeliveryStatus,
    },
}

struct StoredAttempt {
    seq: u64,
    record: NotificationRecord,
}

/// In-memory append-only history store
pub struct HistoryStore {
    records: RwLock<Vec<StoredAttempt>>,
    sequence: AtomicU64,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStore {
    /// Create an empty history store
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            sequence: AtomicU64::new(0),
        }
    }

    /// Append a new delivery attempt record
    pub fn append(&self, record: NotificationRecord) {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        self.records
            .write()
            .expect("history store lock poisoned")
            .push(StoredAttempt { seq, record });
    }

    /// Records for a recipient, most recent first, truncated to `limit`.
    ///
    /// Ordering is by `created_at` descending with the append sequence as
    /// a stable tie-break.
    pub fn query(&self, recipient_id: &str, limit: usize) -> Vec<NotificationRecord> {
        let records = self.records.read().expect("history store lock poisoned");

        let mut matching: Vec<(u64, NotificationRecord)> = records
            .iter()
            .filter(|a| a.record.recipient_id == recipient_id)
            .map(|a| (a.seq, a.record.clone()))
            .collect();

        matching.sort_by(|a, b| {
            b.1.created_at
                .cmp(&a.1.created_at)
                .then_with(|| b.0.cmp(&a.0))
        });

        matching
            .into_iter()
            .take(limit)
            .map(|(_, record)| record)
            .collect()
    }

    /// Snapshot records, optionally filtered to one recipient
    pub fn snapshot(&self, recipient_id: Option<&str>) -> Vec<NotificationRecord> {
        self.records
            .read()
            .expect("history store lock poisoned")
            .iter()
            .filter(|a| recipient_id.map_or(true, |r| a.record.recipient_id == r))
            .map(|a| a.record.clone())
            .collect()
    }

    /// Total number of recorded attempts
    pub fn len(&self) -> usize {
        self.records
            .read()
            .expect("history store lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Mark a pending record as sent
    pub fn mark_sent(&self, id: Uuid) -> Result<(), HistoryError> {
        self.transition(id, DeliveryStatus::Sent, None)
    }

    /// Mark a pending record as failed with the transport error
    pub fn mark_failed(&self, id: Uuid, error: impl Into<String>) -> Result<(), HistoryError> {
        self.transition(id, DeliveryStatus::Failed, Some(error.into()))
    }

    /// Mark a sent record as delivered after a delivery confirmation
    pub fn mark_delivered(&self, id: Uuid) -> Result<(), HistoryError> {
        self.transition(id, DeliveryStatus::Delivered, None)
    }

    fn transition(
        &self,
        id: Uuid,
        to: DeliveryStatus,
        error: Option<String>,
    ) -> Result<(), HistoryError> {
        let mut records = self.records.write().expect("history store lock poisoned");
        let attempt = records
            .iter_mut()
            .find(|a| a.record.id == id)
            .ok_or(HistoryError::NotFound(id))?;

        let from = attempt.record.status;
        let valid = matches!(
            (from, to),
            (DeliveryStatus::Pending, DeliveryStatus::Sent)
                | (DeliveryStatus::Pending, DeliveryStatus::Failed)
                | (DeliveryStatus::Sent, DeliveryStatus::Delivered)
        );
        if !valid {
            return Err(HistoryError::InvalidTransition { from, to });
        }

        let now = Utc::now();
        attempt.record.status = to;
        attempt.record.updated_at = now;
        match to {
            DeliveryStatus::Sent => attempt.record.sent_at = Some(now),
            DeliveryStatus::Delivered => attempt.record.delivered_at = Some(now),
            DeliveryStatus::Failed => attempt.record.error = error,
            DeliveryStatus::Pending => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::{priority_for_event, Priority};

    fn record(recipient_id: &str, event_type: &str) -> NotificationRecord {
        let now = Utc::now();
        NotificationRecord {
            id: Uuid::new_v4(),
            recipient_id: recipient_id.to_string(),
            subject: "Subject".to_string(),
            body: "<p>Body</p>".to_string(),
            text_body: "Body".to_string(),
            event_type: event_type.to_string(),
            priority: priority_for_event(event_type),
            status: DeliveryStatus::Pending,
            created_at: now,
            updated_at: now,
            sent_at: None,
            delivered_at: None,
            error: None,
            metadata: Default::default(),
        }
    }

    #[test]
    fn test_append_and_query() {
        let store = HistoryStore::new();
        store.append(record("cand-1", "welcome"));
        store.append(record("cand-2", "welcome"));

        assert_eq!(store.query("cand-1", DEFAULT_QUERY_LIMIT).len(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_query_most_recent_first() {
        let store = HistoryStore::new();
        let first = record("cand-1", "welcome");
        let second = record("cand-1", "application-status");
        let third = record("cand-1", "rejection");
        let ids = [first.id, second.id, third.id];

        store.append(first);
        store.append(second);
        store.append(third);

        let results = store.query("cand-1", DEFAULT_QUERY_LIMIT);
        let got: Vec<Uuid> = results.iter().map(|r| r.id).collect();
        assert_eq!(got, vec![ids[2], ids[1], ids[0]]);
    }

    #[test]
    fn test_query_honors_limit() {
        let store = HistoryStore::new();
        for _ in 0..10 {
            store.append(record("cand-1", "welcome"));
        }
        assert_eq!(store.query("cand-1", 3).len(), 3);
    }

    #[test]
    fn test_identical_timestamps_break_ties_by_sequence() {
        let store = HistoryStore::new();
        let now = Utc::now();
        let mut a = record("cand-1", "welcome");
        let mut b = record("cand-1", "welcome");
        a.created_at = now;
        b.created_at = now;
        let (id_a, id_b) = (a.id, b.id);

        store.append(a);
        store.append(b);

        let results = store.query("cand-1", DEFAULT_QUERY_LIMIT);
        assert_eq!(results[0].id, id_b);
        assert_eq!(results[1].id, id_a);
    }

    #[test]
    fn test_mark_sent_sets_timestamps() {
        let store = HistoryStore::new();
        let rec = record("cand-1", "welcome");
        let id = rec.id;
        store.append(rec);

        store.mark_sent(id).unwrap();

        let stored = &store.query("cand-1", 1)[0];
        assert_eq!(stored.status, DeliveryStatus::Sent);
        assert!(stored.sent_at.is_some());
        assert!(stored.created_at <= stored.updated_at);
        assert!(stored.error.is_none());
    }

    #[test]
    fn test_mark_failed_records_error() {
        let store = HistoryStore::new();
        let rec = record("cand-1", "welcome");
        let id = rec.id;
        store.append(rec);

        store.mark_failed(id, "smtp unavailable").unwrap();

        let stored = &store.query("cand-1", 1)[0];
        assert_eq!(stored.status, DeliveryStatus::Failed);
        assert_eq!(stored.error.as_deref(), Some("smtp unavailable"));
        assert!(stored.sent_at.is_none());
    }

    #[test]
    fn test_sent_to_delivered() {
        let store = HistoryStore::new();
        let rec = record("cand-1", "welcome");
        let id = rec.id;
        store.append(rec);

        store.mark_sent(id).unwrap();
        store.mark_delivered(id).unwrap();

        let stored = &store.query("cand-1", 1)[0];
        assert_eq!(stored.status, DeliveryStatus::Delivered);
        assert!(stored.delivered_at.is_some());
        assert!(stored.sent_at.is_some());
    }

    #[test]
    fn test_status_never_regresses() {
        let store = HistoryStore::new();
        let rec = record("cand-1", "welcome");
        let id = rec.id;
        store.append(rec);

        store.mark_sent(id).unwrap();
        assert!(matches!(
            store.mark_failed(id, "late failure"),
            Err(HistoryError::InvalidTransition { .. })
        ));

        // Pending is required before delivered
        let rec2 = record("cand-1", "welcome");
        let id2 = rec2.id;
        store.append(rec2);
        assert!(matches!(
            store.mark_delivered(id2),
            Err(HistoryError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_transition_on_unknown_id() {
        let store = HistoryStore::new();
        assert!(matches!(
            store.mark_sent(Uuid::new_v4()),
            Err(HistoryError::NotFound(_))
        ));
    }

    #[test]
    fn test_priority_carried_on_record() {
        let rec = record("cand-1", "interview-reminder");
        assert_eq!(rec.priority, Priority::High);
    }
}
