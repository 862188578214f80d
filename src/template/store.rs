//! Template storage with wholesale registration

use std::sync::RwLock;

use super::types::{Template, TemplateError, TemplateResult};

/// In-memory template storage.
///
/// Registration order is preserved: when two active templates share an
/// event type, lookup returns the first registered one. The whole set is
/// replaced on each registration, so loading the same set twice is a
/// no-op in effect.
pub struct TemplateStore {
    templates: RwLock<Vec<Template>>,
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateStore {
    /// Create an empty template store
    pub fn new() -> Self {
        Self {
            templates: RwLock::new(Vec::new()),
        }
    }

    /// Replace the registered template set wholesale.
    ///
    /// Every template is validated before any replacement happens, so a
    /// bad batch leaves the existing set untouched.
    pub fn register(&self, templates: Vec<Template>) -> TemplateResult<()> {
        for template in &templates {
            template.validate()?;
        }

        let count = templates.len();
        *self.templates.write().expect("template store lock poisoned") = templates;

        tracing::info!(count = count, "Registered template set");
        Ok(())
    }

    /// Find the first active template for an event type, in registration order
    pub fn lookup(&self, event_type: &str) -> TemplateResult<Template> {
        self.templates
            .read()
            .expect("template store lock poisoned")
            .iter()
            .find(|t| t.active && t.event_type == event_type)
            .cloned()
            .ok_or_else(|| TemplateError::NotFound(event_type.to_string()))
    }

    /// All registered templates in registration order
    pub fn list(&self) -> Vec<Template> {
        self.templates
            .read()
            .expect("template store lock poisoned")
            .clone()
    }

    /// Number of registered templates
    pub fn count(&self) -> usize {
        self.templates
            .read()
            .expect("template store lock poisoned")
            .len()
    }
}
