//! Notification record types and the fixed priority table

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::template::VariableMap;

/// Priority levels for notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
    Urgent,
}

/// Priority is derived from the event type via a fixed table, never
/// configured per send.
pub fn priority_for_event(event_type: &str) -> Priority {
    match event_type {
        "interview-reminder" => Priority::High,
        "interview-scheduled" | "offer-letter" | "application-status" | "rejection" => {
            Priority::Medium
        }
        _ => Priority::Low,
    }
}

/// Lifecycle of a delivery attempt.
///
/// Transitions are monotonic: pending -> sent or failed, and sent ->
/// delivered when a delivery confirmation is observed later. A record
/// never regresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Pending,
    Sent,
    Delivered,
    Failed,
}

/// One recorded delivery attempt.
///
/// Created only after the policy check and template lookup both succeed;
/// blocked and template-missing sends leave no record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    pub id: Uuid,
    pub recipient_id: String,
    pub subject: String,
    /// Rendered HTML body
    pub body: String,
    /// Rendered plain-text body, for multipart transports
    pub text_body: String,
    pub event_type: String,
    pub priority: Priority,
    pub status: DeliveryStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub metadata: VariableMap,
}

/// Outcome of a send request.
///
/// `send` never returns an error type; validation and transport failures
/// both surface here so the caller decides what to do next.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SendOutcome {
    pub fn delivered(notification_id: Uuid) -> Self {
        Self {
            success: true,
            notification_id: Some(notification_id),
            error: None,
        }
    }

    pub fn transport_failure(notification_id: Uuid, error: impl Into<String>) -> Self {
        Self {
            success: false,
            notification_id: Some(notification_id),
            error: Some(error.into()),
        }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            success: false,
            notification_id: None,
            error: Some(error.into()),
        }
    }
}

/// Arguments for the application-status convenience sender
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStatusUpdate {
    pub candidate_name: String,
    pub position: String,
    pub company: String,
    pub old_status: String,
    pub new_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_steps: Option<String>,
    pub application_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
}

/// Arguments for the interview convenience senders
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewDetails {
    pub candidate_name: String,
    pub position: String,
    pub company: String,
    pub interview_date: String,
    pub interview_time: String,
    pub duration: String,
    pub interview_type: String,
    pub interviewer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub calendar_url: String,
    pub reschedule_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interview_id: Option<String>,
}
