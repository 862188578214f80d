//! Send, history, and stats endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::history::NotificationStats;
use crate::notification::{NotificationRecord, SendOutcome};
use crate::server::AppState;
use crate::template::VariableMap;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationRequest {
    pub recipient_id: String,
    pub event_type: String,
    #[serde(default)]
    pub variables: VariableMap,
    pub metadata: Option<VariableMap>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsQuery {
    pub recipient_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub notifications: Vec<NotificationRecord>,
    pub total: usize,
}

/// POST /api/v1/notifications/send - Execute one send
#[tracing::instrument(
    name = "http.send_notification",
    skip(state, request),
    fields(recipient_id = %request.recipient_id, event_type = %request.event_type)
)]
pub async fn send_notification(
    State(state): State<AppState>,
    Json(request): Json<SendNotificationRequest>,
) -> Result<Json<SendOutcome>, AppError> {
    if request.recipient_id.is_empty() {
        return Err(AppError::Validation(
            "recipientId must not be empty".to_string(),
        ));
    }

    let outcome = state
        .service
        .send(
            &request.recipient_id,
            &request.event_type,
            request.variables,
            request.metadata,
        )
        .await;

    Ok(Json(outcome))
}

/// POST /api/v1/notifications/{id}/delivered - Record a delivery confirmation
#[tracing::instrument(name = "http.confirm_delivery", skip(state))]
pub async fn confirm_delivery(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.service.confirm_delivery(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/notifications/history/{recipient_id} - Delivery history
#[tracing::instrument(name = "http.get_history", skip(state, query))]
pub async fn get_history(
    State(state): State<AppState>,
    Path(recipient_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Json<HistoryResponse> {
    let notifications = state.service.get_history(&recipient_id, query.limit);
    let total = notifications.len();

    Json(HistoryResponse {
        notifications,
        total,
    })
}

/// GET /api/v1/stats - Aggregate delivery statistics
#[tracing::instrument(name = "http.get_stats", skip(state, query))]
pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Json<NotificationStats> {
    Json(state.service.get_stats(query.recipient_id.as_deref()))
}
