//! Delivery transport abstraction.
//!
//! The engine never talks to a provider directly; it hands the rendered
//! record to a `TransportAdapter`. Production deployments inject a real
//! provider client, tests inject deterministic stubs, and the bundled
//! adapters cover demos (`simulated`) and local development (`log`).

mod log;
mod simulated;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::TransportConfig;
use crate::notification::NotificationRecord;

pub use log::LogTransport;
pub use simulated::SimulatedTransport;

/// Outcome of a single transport attempt.
///
/// Adapters report failure through this value instead of panicking or
/// returning an error type; the service records the outcome either way.
#[derive(Debug, Clone, Serialize)]
pub struct TransportResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TransportResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Delivery transport for rendered notifications.
///
/// Implementations must be `Send + Sync`; the service shares one adapter
/// across concurrent sends. A slow adapter is bounded by the service's
/// transport timeout.
#[async_trait]
pub trait TransportAdapter: Send + Sync {
    /// Attempt to deliver one rendered notification
    async fn send(&self, record: &NotificationRecord) -> TransportResult;

    /// Short identifier for logs and health output
    fn name(&self) -> &'static str;
}

/// Create a transport adapter from configuration.
///
/// Unknown backend names fall back to the log transport so a typo in
/// configuration degrades to observable no-op delivery instead of a
/// panic at startup.
pub fn create_transport(config: &TransportConfig) -> Arc<dyn TransportAdapter> {
    match config.backend.as_str() {
        "simulated" => Arc::new(SimulatedTransport::new(
            config.latency_ms,
            config.failure_rate,
        )),
        "log" => Arc::new(LogTransport),
        other => {
            tracing::warn!(backend = %other, "Unknown transport backend, using log transport");
            Arc::new(LogTransport)
        }
    }
}
