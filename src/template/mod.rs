//! Notification template system.
//!
//! This module provides:
//! - Template definition with subject/HTML/text bodies
//! - Wholesale template registration with first-active-wins lookup
//! - A two-pass rendering engine: {{variable}} substitution followed by
//!   single-level {{#key}}...{{/key}} conditional blocks
//!
//! # Example
//!
//! ```ignore
//! let store = TemplateStore::new();
//! store.register(default_templates())?;
//!
//! let template = store.lookup("interview-scheduled")?;
//! let subject = render(&template.subject_template, &variables);
//! ```

mod builtin;
mod render;
mod store;
mod types;

pub use builtin::default_templates;
pub use render::{render, VariableMap};
pub use store::TemplateStore;
pub use types::{RenderedMessage, Template, TemplateError, TemplateListResponse, TemplateResult};
