//! Log-only transport.
//!
//! Logs the would-be delivery and always succeeds. Used in local
//! development and as the fallback for unknown backend names.

use async_trait::async_trait;

use crate::notification::NotificationRecord;

use super::{TransportAdapter, TransportResult};

#[derive(Debug, Clone, Default)]
pub struct LogTransport;

#[async_trait]
impl TransportAdapter for LogTransport {
    async fn send(&self, record: &NotificationRecord) -> TransportResult {
        tracing::info!(
            notification_id = %record.id,
            recipient_id = %record.recipient_id,
            event_type = %record.event_type,
            subject = %record.subject,
            "Log transport: delivery skipped"
        );
        TransportResult::ok()
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
