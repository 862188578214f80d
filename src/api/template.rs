//! Template registration endpoints.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::error::AppError;
use crate::server::AppState;
use crate::template::{Template, TemplateListResponse};

#[derive(Debug, Deserialize)]
pub struct RegisterTemplatesRequest {
    /// The full template set; replaces anything registered before
    pub templates: Vec<Template>,
}

/// POST /api/v1/templates - Replace the registered template set
#[tracing::instrument(
    name = "http.register_templates",
    skip(state, request),
    fields(count = request.templates.len())
)]
pub async fn register_templates(
    State(state): State<AppState>,
    Json(request): Json<RegisterTemplatesRequest>,
) -> Result<StatusCode, AppError> {
    state.service.register_templates(request.templates)?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/templates - List registered templates
#[tracing::instrument(name = "http.list_templates", skip(state))]
pub async fn list_templates(State(state): State<AppState>) -> Json<TemplateListResponse> {
    let templates = state.service.list_templates();
    let total = templates.len();

    Json(TemplateListResponse { templates, total })
}
