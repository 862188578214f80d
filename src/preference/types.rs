//! Delivery preference types

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// How often a recipient wants notifications batched.
///
/// Only `immediate` affects delivery today; daily/weekly digests are a
/// caller-side concern and the value is stored as configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Immediate,
    Daily,
    Weekly,
}

/// A do-not-disturb window in local "HH:MM" times.
///
/// Stored and settable but not consulted by the delivery policy; enforcing
/// it would change delivery outcomes for existing data and needs a product
/// decision first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuietHours {
    pub enabled: bool,
    pub start: String,
    pub end: String,
}

impl Default for QuietHours {
    fn default() -> Self {
        Self {
            enabled: false,
            start: "22:00".to_string(),
            end: "08:00".to_string(),
        }
    }
}

/// A recipient's stored delivery preferences.
///
/// Absence of a record means "no restriction". The record is replaced
/// wholesale on every set, never patched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preference {
    /// Recipient this preference belongs to
    pub recipient_id: String,

    /// Delivery address
    pub email: String,

    /// Master switch; false blocks every event type
    #[serde(default = "default_enabled")]
    pub enabled_global: bool,

    /// Per-type opt-outs keyed by toggle name (e.g. "interviewReminder").
    /// A missing key means allowed; only an explicit `false` blocks.
    #[serde(default)]
    pub per_type_toggles: HashMap<String, bool>,

    #[serde(default)]
    pub frequency: Frequency,

    #[serde(default)]
    pub quiet_hours: QuietHours,
}

fn default_enabled() -> bool {
    true
}

impl Preference {
    /// A permissive preference record for a recipient
    pub fn new(recipient_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            recipient_id: recipient_id.into(),
            email: email.into(),
            enabled_global: true,
            per_type_toggles: HashMap::new(),
            frequency: Frequency::default(),
            quiet_hours: QuietHours::default(),
        }
    }
}
