//! Template types and error definitions

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Template-specific error type
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("No active template for event type: {0}")]
    NotFound(String),

    #[error("Invalid template ID: {0}")]
    InvalidId(String),

    #[error("Invalid template: {0}")]
    InvalidTemplate(String),
}

/// Result type for template operations
pub type TemplateResult<T> = Result<T, TemplateError>;

/// A message template for one event type.
///
/// Templates are immutable once registered; the whole set is replaced by a
/// new bulk registration. More than one active template may exist for the
/// same event type, in which case lookup returns the first registered one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Unique template identifier (alphanumeric, dash, underscore)
    pub id: String,

    /// Event type this template renders (e.g. "interview-scheduled")
    pub event_type: String,

    /// Subject line with {{variable}} placeholders
    pub subject_template: String,

    /// HTML body with {{variable}} placeholders and {{#key}}...{{/key}} blocks
    pub html_body_template: String,

    /// Plain-text body with the same placeholder syntax
    pub text_body_template: String,

    /// Variable names callers are expected to supply
    #[serde(default)]
    pub declared_variables: BTreeSet<String>,

    /// Inactive templates are skipped by lookup
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Template {
    /// Validate the template
    pub fn validate(&self) -> TemplateResult<()> {
        if self.id.is_empty() || self.id.len() > 64 {
            return Err(TemplateError::InvalidId(
                "ID must be 1-64 characters".to_string(),
            ));
        }

        if !self
            .id
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        {
            return Err(TemplateError::InvalidId(
                "ID must contain only alphanumeric, dash, or underscore".to_string(),
            ));
        }

        if self.event_type.is_empty() || self.event_type.len() > 128 {
            return Err(TemplateError::InvalidTemplate(
                "Event type must be 1-128 characters".to_string(),
            ));
        }

        if self.subject_template.is_empty() {
            return Err(TemplateError::InvalidTemplate(
                "Subject template must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Subject and bodies of a template after rendering
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedMessage {
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

/// Response for listing templates
#[derive(Debug, Serialize)]
pub struct TemplateListResponse {
    /// Templates in registration order
    pub templates: Vec<Template>,

    /// Total count
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_template() -> Template {
        Template {
            id: "welcome-v1".to_string(),
            event_type: "welcome".to_string(),
            subject_template: "Welcome, {{candidateName}}".to_string(),
            html_body_template: "<p>Hello {{candidateName}}</p>".to_string(),
            text_body_template: "Hello {{candidateName}}".to_string(),
            declared_variables: ["candidateName".to_string()].into_iter().collect(),
            active: true,
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(sample_template().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_id() {
        let mut template = sample_template();
        template.id = "bad id!".to_string();
        assert!(matches!(
            template.validate(),
            Err(TemplateError::InvalidId(_))
        ));
    }

    #[test]
    fn test_validate_rejects_empty_subject() {
        let mut template = sample_template();
        template.subject_template = String::new();
        assert!(matches!(
            template.validate(),
            Err(TemplateError::InvalidTemplate(_))
        ));
    }
}
