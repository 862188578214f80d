use axum::{
    routing::{get, post, put},
    Router,
};

use crate::server::AppState;

use super::health::health;
use super::metrics::prometheus_metrics;
use super::notification::{confirm_delivery, get_history, get_stats, send_notification};
use super::preference::{get_preferences, set_preferences};
use super::template::{list_templates, register_templates};

pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health & Metrics
        .route("/health", get(health))
        .route("/metrics", get(prometheus_metrics))
        // Engine endpoints
        .nest(
            "/api/v1",
            Router::new()
                // Templates
                .route(
                    "/templates",
                    post(register_templates).get(list_templates),
                )
                // Preferences
                .route("/preferences", put(set_preferences))
                .route("/preferences/{recipient_id}", get(get_preferences))
                // Notifications
                .route("/notifications/send", post(send_notification))
                .route("/notifications/{id}/delivered", post(confirm_delivery))
                .route(
                    "/notifications/history/{recipient_id}",
                    get(get_history),
                )
                // Stats
                .route("/stats", get(get_stats)),
        )
}
