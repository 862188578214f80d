//! Delivery preference endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::AppError;
use crate::preference::Preference;
use crate::server::AppState;

/// PUT /api/v1/preferences - Set (replace) a recipient's preferences
#[tracing::instrument(
    name = "http.set_preferences",
    skip(state, preference),
    fields(recipient_id = %preference.recipient_id)
)]
pub async fn set_preferences(
    State(state): State<AppState>,
    Json(preference): Json<Preference>,
) -> Result<StatusCode, AppError> {
    if preference.recipient_id.is_empty() {
        return Err(AppError::Validation(
            "recipientId must not be empty".to_string(),
        ));
    }

    state.service.set_preferences(preference);
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/preferences/{recipient_id} - Get a recipient's preferences
#[tracing::instrument(name = "http.get_preferences", skip(state))]
pub async fn get_preferences(
    State(state): State<AppState>,
    Path(recipient_id): Path<String>,
) -> Result<Json<Preference>, AppError> {
    state
        .service
        .get_preferences(&recipient_id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No preferences for recipient {recipient_id}")))
}
