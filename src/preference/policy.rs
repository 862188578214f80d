//! Delivery gating policy.
//!
//! Pure decision function over a recipient's stored preferences. A missing
//! preference record allows everything; the global switch blocks
//! everything; a per-type toggle that is explicitly `false` blocks that
//! event type. Event types with no mapped toggle are always allowed.
//!
//! Quiet hours are part of the preference shape but deliberately not
//! consulted here.

use super::types::Preference;

/// Outcome of a policy check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyDecision {
    pub allowed: bool,
    pub reason: Option<String>,
}

impl PolicyDecision {
    fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    fn deny(reason: &str) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.to_string()),
        }
    }
}

/// Map an event type to its preference toggle key
pub fn toggle_key(event_type: &str) -> Option<&'static str> {
    match event_type {
        "application-status" => Some("applicationStatus"),
        "interview-scheduled" => Some("interviewScheduled"),
        "interview-reminder" => Some("interviewReminder"),
        "offer-letter" => Some("offerLetter"),
        "rejection" => Some("rejection"),
        _ => None,
    }
}

/// Decide whether an event type may be delivered to a recipient
pub fn is_allowed(preference: Option<&Preference>, event_type: &str) -> PolicyDecision {
    let Some(preference) = preference else {
        // No restriction registered yet
        return PolicyDecision::allow();
    };

    if !preference.enabled_global {
        return PolicyDecision::deny("notifications disabled");
    }

    if let Some(key) = toggle_key(event_type) {
        if preference.per_type_toggles.get(key) == Some(&false) {
            return PolicyDecision::deny("type disabled by preference");
        }
    }

    PolicyDecision::allow()
}
