//! Delivery attempt history and aggregate statistics.

mod stats;
mod store;

pub use stats::{aggregate, NotificationStats, KNOWN_EVENT_TYPES};
pub use store::{HistoryError, HistoryStore, DEFAULT_QUERY_LIMIT};
