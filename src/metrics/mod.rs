//! Prometheus metrics for the notification engine.
//!
//! Counters cover the send pipeline outcomes (sent, failed, blocked,
//! template-missing, timed out) plus per-event-type volume and transport
//! latency. Exported through the `/metrics` endpoint in text format.

use lazy_static::lazy_static;
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, Histogram, IntCounter,
    IntCounterVec, TextEncoder,
};

/// Prefix for all metrics
const METRIC_PREFIX: &str = "talentflow";

lazy_static! {
    /// Notifications accepted by the transport
    pub static ref NOTIFICATIONS_SENT_TOTAL: IntCounter = register_int_counter!(
        format!("{}_notifications_sent_total", METRIC_PREFIX),
        "Total notifications accepted by the transport"
    ).unwrap();

    /// Notifications the transport failed to deliver
    pub static ref NOTIFICATIONS_FAILED_TOTAL: IntCounter = register_int_counter!(
        format!("{}_notifications_failed_total", METRIC_PREFIX),
        "Total notifications the transport failed to deliver"
    ).unwrap();

    /// Sends denied by the recipient's delivery preferences
    pub static ref NOTIFICATIONS_BLOCKED_TOTAL: IntCounter = register_int_counter!(
        format!("{}_notifications_blocked_total", METRIC_PREFIX),
        "Total sends denied by delivery preferences"
    ).unwrap();

    /// Sends rejected because no active template matched the event type
    pub static ref TEMPLATE_MISSES_TOTAL: IntCounter = register_int_counter!(
        format!("{}_template_misses_total", METRIC_PREFIX),
        "Total sends with no active template for the event type"
    ).unwrap();

    /// Transport attempts that hit the timeout bound
    pub static ref TRANSPORT_TIMEOUTS_TOTAL: IntCounter = register_int_counter!(
        format!("{}_transport_timeouts_total", METRIC_PREFIX),
        "Total transport attempts that timed out"
    ).unwrap();

    /// Send attempts by event type (counted after validation passes)
    pub static ref SENDS_BY_TYPE_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_sends_by_type_total", METRIC_PREFIX),
        "Send attempts by event type",
        &["event_type"]
    ).unwrap();

    /// Transport round-trip latency in seconds
    pub static ref TRANSPORT_LATENCY_SECONDS: Histogram = register_histogram!(
        format!("{}_transport_latency_seconds", METRIC_PREFIX),
        "Transport round-trip latency in seconds",
        vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    ).unwrap();
}

/// Encode all registered metrics in Prometheus text format
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    encoder.encode_to_string(&metric_families)
}

/// Helper struct for recording delivery metrics
pub struct DeliveryMetrics;

impl DeliveryMetrics {
    pub fn record_sent(event_type: &str) {
        NOTIFICATIONS_SENT_TOTAL.inc();
        SENDS_BY_TYPE_TOTAL.with_label_values(&[event_type]).inc();
    }

    pub fn record_failed(event_type: &str) {
        NOTIFICATIONS_FAILED_TOTAL.inc();
        SENDS_BY_TYPE_TOTAL.with_label_values(&[event_type]).inc();
    }

    pub fn record_blocked() {
        NOTIFICATIONS_BLOCKED_TOTAL.inc();
    }

    pub fn record_template_miss() {
        TEMPLATE_MISSES_TOTAL.inc();
    }

    pub fn record_timeout(event_type: &str) {
        TRANSPORT_TIMEOUTS_TOTAL.inc();
        SENDS_BY_TYPE_TOTAL.with_label_values(&[event_type]).inc();
    }

    pub fn observe_transport_latency(seconds: f64) {
        TRANSPORT_LATENCY_SECONDS.observe(seconds);
    }
}
