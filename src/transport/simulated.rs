//! Simulated transport for demos.
//!
//! Sleeps for a configured latency and fails a configured fraction of
//! sends. Exists purely so the service can be exercised without a real
//! provider; the core never depends on this behavior.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use crate::notification::NotificationRecord;

use super::{TransportAdapter, TransportResult};

pub struct SimulatedTransport {
    latency: Duration,
    failure_rate: f64,
}

impl SimulatedTransport {
    /// Create a simulated transport with the given latency and failure
    /// rate (clamped to 0.0..=1.0)
    pub fn new(latency_ms: u64, failure_rate: f64) -> Self {
        Self {
            latency: Duration::from_millis(latency_ms),
            failure_rate: failure_rate.clamp(0.0, 1.0),
        }
    }
}

#[async_trait]
impl TransportAdapter for SimulatedTransport {
    async fn send(&self, record: &NotificationRecord) -> TransportResult {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let roll: f64 = rand::rng().random();
        if roll < self.failure_rate {
            tracing::debug!(
                notification_id = %record.id,
                recipient_id = %record.recipient_id,
                "Simulated transport failure"
            );
            return TransportResult::failure("simulated delivery failure");
        }

        tracing::debug!(
            notification_id = %record.id,
            recipient_id = %record.recipient_id,
            "Simulated transport success"
        );
        TransportResult::ok()
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}
