//! API layer - HTTP endpoint handlers organized by domain.

mod health;
mod metrics;
mod notification;
mod preference;
mod routes;
mod template;

pub use health::health;
pub use metrics::prometheus_metrics;
pub use notification::{confirm_delivery, get_history, get_stats, send_notification};
pub use preference::{get_preferences, set_preferences};
pub use routes::api_routes;
pub use template::{list_templates, register_templates};
