//! Notification orchestration.
//!
//! `NotificationService` ties the stores together and drives a send
//! through its lifecycle: policy check, template lookup, rendering,
//! history append, transport attempt, status update. Validation failures
//! (policy-denied, template-missing) are returned synchronously and leave
//! no trace; transport failures are recorded. This layer never retries a
//! failed send.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value;
use uuid::Uuid;

use chrono::Utc;

use crate::history::{aggregate, HistoryError, HistoryStore, NotificationStats};
use crate::metrics::DeliveryMetrics;
use crate::preference::{self, Preference, PreferenceStore};
use crate::template::{
    render, RenderedMessage, Template, TemplateResult, TemplateStore, VariableMap,
};
use crate::transport::TransportAdapter;

use super::types::{
    priority_for_event, ApplicationStatusUpdate, DeliveryStatus, InterviewDetails,
    NotificationRecord, SendOutcome,
};

/// The public face of the notification engine.
///
/// Owns the template, preference, and history stores and an injected
/// transport adapter. Construct one per process (or per test) and share
/// it behind an `Arc`; there is no ambient global state.
pub struct NotificationService {
    templates: Arc<TemplateStore>,
    preferences: Arc<PreferenceStore>,
    history: Arc<HistoryStore>,
    transport: Arc<dyn TransportAdapter>,
    transport_timeout: Duration,
    default_query_limit: usize,
}

impl NotificationService {
    /// Create a service with fresh stores and the given transport
    pub fn new(transport: Arc<dyn TransportAdapter>, transport_timeout: Duration) -> Self {
        Self {
            templates: Arc::new(TemplateStore::new()),
            preferences: Arc::new(PreferenceStore::new()),
            history: Arc::new(HistoryStore::new()),
            transport,
            transport_timeout,
            default_query_limit: crate::history::DEFAULT_QUERY_LIMIT,
        }
    }

    /// Override the default history query limit
    pub fn with_default_query_limit(mut self, limit: usize) -> Self {
        self.default_query_limit = limit;
        self
    }

    /// Replace the registered template set wholesale
    pub fn register_templates(&self, templates: Vec<Template>) -> TemplateResult<()> {
        self.templates.register(templates)
    }

    /// Registered templates in registration order
    pub fn list_templates(&self) -> Vec<Template> {
        self.templates.list()
    }

    /// Set (replace) a recipient's delivery preferences
    pub fn set_preferences(&self, preference: Preference) {
        self.preferences.set(preference);
    }

    /// A recipient's stored preferences, if any were ever set
    pub fn get_preferences(&self, recipient_id: &str) -> Option<Preference> {
        self.preferences.resolve(recipient_id)
    }

    /// Delivery attempts for a recipient, most recent first
    pub fn get_history(
        &self,
        recipient_id: &str,
        limit: Option<usize>,
    ) -> Vec<NotificationRecord> {
        self.history
            .query(recipient_id, limit.unwrap_or(self.default_query_limit))
    }

    /// Aggregate stats, optionally scoped to one recipient
    pub fn get_stats(&self, recipient_id: Option<&str>) -> NotificationStats {
        aggregate(&self.history.snapshot(recipient_id))
    }

    /// Record a delivery confirmation observed from the provider
    pub fn confirm_delivery(&self, notification_id: Uuid) -> Result<(), HistoryError> {
        self.history.mark_delivered(notification_id)
    }

    /// Number of registered templates (health output)
    pub fn template_count(&self) -> usize {
        self.templates.count()
    }

    /// Number of recipients with stored preferences (health output)
    pub fn preference_count(&self) -> usize {
        self.preferences.count()
    }

    /// Total recorded delivery attempts (health output)
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Transport backend identifier (health output)
    pub fn transport_name(&self) -> &'static str {
        self.transport.name()
    }

    /// Execute one send.
    ///
    /// Never returns an error: validation and transport failures are both
    /// reported through the outcome. A history record exists only when
    /// the attempt got past validation, and is appended in `pending`
    /// state before the transport runs so an interrupted send stays
    /// observable.
    #[tracing::instrument(
        name = "notification.send",
        skip(self, variables, metadata),
        fields(recipient_id = %recipient_id, event_type = %event_type)
    )]
    pub async fn send(
        &self,
        recipient_id: &str,
        event_type: &str,
        variables: VariableMap,
        metadata: Option<VariableMap>,
    ) -> SendOutcome {
        // 1. Delivery policy
        let preference = self.preferences.resolve(recipient_id);
        let decision = preference::is_allowed(preference.as_ref(), event_type);
        if !decision.allowed {
            let reason = decision
                .reason
                .unwrap_or_else(|| "delivery denied".to_string());
            DeliveryMetrics::record_blocked();
            tracing::debug!(reason = %reason, "Send blocked by preferences");
            return SendOutcome::rejected(reason);
        }

        // 2. Template lookup
        let template = match self.templates.lookup(event_type) {
            Ok(template) => template,
            Err(e) => {
                DeliveryMetrics::record_template_miss();
                tracing::debug!(error = %e, "Send rejected, no active template");
                return SendOutcome::rejected("template not found");
            }
        };

        // 3. Render
        let message = RenderedMessage {
            subject: render(&template.subject_template, &variables),
            html_body: render(&template.html_body_template, &variables),
            text_body: render(&template.text_body_template, &variables),
        };

        // 4. Build the record
        let mut metadata = metadata.unwrap_or_default();
        metadata.insert("templateId".to_string(), Value::String(template.id.clone()));

        let now = Utc::now();
        let record = NotificationRecord {
            id: Uuid::new_v4(),
            recipient_id: recipient_id.to_string(),
            subject: message.subject,
            body: message.html_body,
            text_body: message.text_body,
            event_type: event_type.to_string(),
            priority: priority_for_event(event_type),
            status: DeliveryStatus::Pending,
            created_at: now,
            updated_at: now,
            sent_at: None,
            delivered_at: None,
            error: None,
            metadata,
        };
        let notification_id = record.id;

        // 5. Append before the transport runs
        self.history.append(record.clone());

        // 6. Transport, bounded by the configured timeout. A timed-out
        //    attempt leaves the record pending for later reconciliation.
        let started = Instant::now();
        let result = tokio::time::timeout(self.transport_timeout, self.transport.send(&record))
            .await;
        DeliveryMetrics::observe_transport_latency(started.elapsed().as_secs_f64());

        let transport_result = match result {
            Ok(result) => result,
            Err(_) => {
                DeliveryMetrics::record_timeout(event_type);
                tracing::warn!(
                    notification_id = %notification_id,
                    timeout_ms = self.transport_timeout.as_millis() as u64,
                    "Transport timed out, record left pending"
                );
                return SendOutcome::transport_failure(notification_id, "transport timed out");
            }
        };

        // 7. Record the outcome
        if transport_result.success {
            if let Err(e) = self.history.mark_sent(notification_id) {
                tracing::error!(notification_id = %notification_id, error = %e, "Failed to mark record sent");
            }
            DeliveryMetrics::record_sent(event_type);
            tracing::debug!(notification_id = %notification_id, "Notification sent");
            SendOutcome::delivered(notification_id)
        } else {
            let error = transport_result
                .error
                .unwrap_or_else(|| "transport failure".to_string());
            if let Err(e) = self.history.mark_failed(notification_id, error.clone()) {
                tracing::error!(notification_id = %notification_id, error = %e, "Failed to mark record failed");
            }
            DeliveryMetrics::record_failed(event_type);
            tracing::debug!(
                notification_id = %notification_id,
                error = %error,
                "Notification delivery failed"
            );
            SendOutcome::transport_failure(notification_id, error)
        }
    }

    /// Send an application status change notification.
    ///
    /// Argument-shaping wrapper over `send`; fixes the variable names the
    /// application-status template declares.
    pub async fn send_application_status_update(
        &self,
        recipient_id: &str,
        update: ApplicationStatusUpdate,
    ) -> SendOutcome {
        let mut metadata = VariableMap::new();
        if let Some(application_id) = &update.application_id {
            metadata.insert(
                "applicationId".to_string(),
                Value::String(application_id.clone()),
            );
        }

        self.send(
            recipient_id,
            "application-status",
            to_variables(&update),
            Some(metadata),
        )
        .await
    }

    /// Send an interview confirmation notification
    pub async fn send_interview_scheduled(
        &self,
        recipient_id: &str,
        details: InterviewDetails,
    ) -> SendOutcome {
        self.send_interview(recipient_id, "interview-scheduled", details)
            .await
    }

    /// Send an interview reminder notification
    pub async fn send_interview_reminder(
        &self,
        recipient_id: &str,
        details: InterviewDetails,
    ) -> SendOutcome {
        self.send_interview(recipient_id, "interview-reminder", details)
            .await
    }

    async fn send_interview(
        &self,
        recipient_id: &str,
        event_type: &str,
        details: InterviewDetails,
    ) -> SendOutcome {
        let mut metadata = VariableMap::new();
        if let Some(interview_id) = &details.interview_id {
            metadata.insert(
                "interviewId".to_string(),
                Value::String(interview_id.clone()),
            );
        }

        self.send(recipient_id, event_type, to_variables(&details), Some(metadata))
            .await
    }
}

/// Serialize a params struct into a variable bag. The structs carry
/// camelCase serde names matching the template placeholders, and skipped
/// optionals stay absent so conditional blocks fall away.
fn to_variables<T: serde::Serialize>(params: &T) -> VariableMap {
    match serde_json::to_value(params) {
        Ok(Value::Object(map)) => map,
        _ => VariableMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::template::default_templates;
    use crate::transport::{TransportAdapter, TransportResult};

    struct ForcedTransport {
        succeed: bool,
    }

    #[async_trait]
    impl TransportAdapter for ForcedTransport {
        async fn send(&self, _record: &NotificationRecord) -> TransportResult {
            if self.succeed {
                TransportResult::ok()
            } else {
                TransportResult::failure("forced failure")
            }
        }

        fn name(&self) -> &'static str {
            "forced"
        }
    }

    fn service(succeed: bool) -> NotificationService {
        let service = NotificationService::new(
            Arc::new(ForcedTransport { succeed }),
            Duration::from_secs(1),
        );
        service.register_templates(default_templates()).unwrap();
        service
    }

    fn welcome_variables() -> VariableMap {
        let mut vars = VariableMap::new();
        vars.insert("candidateName".to_string(), Value::String("Dana".into()));
        vars.insert("company".to_string(), Value::String("Acme".into()));
        vars
    }

    #[tokio::test]
    async fn test_send_success_records_sent() {
        let service = service(true);

        let outcome = service
            .send("cand-1", "welcome", welcome_variables(), None)
            .await;
        assert!(outcome.success);

        let history = service.get_history("cand-1", None);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status, DeliveryStatus::Sent);
        assert_eq!(history[0].subject, "Welcome to Acme Careers");
        assert!(history[0].sent_at.is_some());
    }

    #[tokio::test]
    async fn test_send_failure_recorded_not_retried() {
        let service = service(false);

        let outcome = service
            .send("cand-1", "welcome", welcome_variables(), None)
            .await;
        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("forced failure"));

        let history = service.get_history("cand-1", None);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status, DeliveryStatus::Failed);
        assert_eq!(history[0].error.as_deref(), Some("forced failure"));
    }

    #[tokio::test]
    async fn test_blocked_send_leaves_no_trace() {
        let service = service(true);
        let mut pref = Preference::new("cand-1", "cand@example.com");
        pref.enabled_global = false;
        service.set_preferences(pref);

        let outcome = service
            .send("cand-1", "welcome", welcome_variables(), None)
            .await;
        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("notifications disabled"));
        assert!(outcome.notification_id.is_none());
        assert!(service.get_history("cand-1", None).is_empty());
        assert_eq!(service.get_stats(Some("cand-1")).total, 0);
    }

    #[tokio::test]
    async fn test_missing_template_leaves_no_trace() {
        let service = service(true);

        let outcome = service
            .send("cand-1", "no-such-event", VariableMap::new(), None)
            .await;
        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("template not found"));
        assert!(service.get_history("cand-1", None).is_empty());
    }

    #[tokio::test]
    async fn test_metadata_merged_with_template_id() {
        let service = service(true);
        let mut metadata = VariableMap::new();
        metadata.insert("applicationId".to_string(), Value::String("app-7".into()));

        service
            .send("cand-1", "welcome", welcome_variables(), Some(metadata))
            .await;

        let record = &service.get_history("cand-1", None)[0];
        assert_eq!(record.metadata["templateId"], "welcome-v1");
        assert_eq!(record.metadata["applicationId"], "app-7");
    }

    #[tokio::test]
    async fn test_priority_derived_from_event_type() {
        let service = service(true);
        let mut vars = VariableMap::new();
        for key in [
            "candidateName",
            "position",
            "company",
            "interviewDate",
            "interviewTime",
            "interviewType",
            "rescheduleUrl",
        ] {
            vars.insert(key.to_string(), Value::String("x".into()));
        }

        service
            .send("cand-1", "interview-reminder", vars, None)
            .await;

        let record = &service.get_history("cand-1", None)[0];
        assert_eq!(record.priority, crate::notification::Priority::High);
    }

    #[tokio::test]
    async fn test_timeout_leaves_record_pending() {
        struct SlowTransport;

        #[async_trait]
        impl TransportAdapter for SlowTransport {
            async fn send(&self, _record: &NotificationRecord) -> TransportResult {
                tokio::time::sleep(Duration::from_secs(60)).await;
                TransportResult::ok()
            }

            fn name(&self) -> &'static str {
                "slow"
            }
        }

        let service =
            NotificationService::new(Arc::new(SlowTransport), Duration::from_millis(10));
        service.register_templates(default_templates()).unwrap();

        let outcome = service
            .send("cand-1", "welcome", welcome_variables(), None)
            .await;
        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("transport timed out"));

        let history = service.get_history("cand-1", None);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status, DeliveryStatus::Pending);
    }

    #[tokio::test]
    async fn test_convenience_sender_shapes_variables() {
        let service = service(true);

        let outcome = service
            .send_interview_scheduled(
                "cand-1",
                InterviewDetails {
                    candidate_name: "Dana".to_string(),
                    position: "Engineer".to_string(),
                    company: "Acme".to_string(),
                    interview_date: "2026-09-01".to_string(),
                    interview_time: "10:00".to_string(),
                    duration: "45 minutes".to_string(),
                    interview_type: "technical".to_string(),
                    interviewer: "Sam".to_string(),
                    meeting_link: Some("https://meet.example/abc".to_string()),
                    location: None,
                    calendar_url: "https://cal.example/1".to_string(),
                    reschedule_url: "https://cal.example/1/move".to_string(),
                    interview_id: Some("int-42".to_string()),
                },
            )
            .await;
        assert!(outcome.success);

        let record = &service.get_history("cand-1", None)[0];
        assert_eq!(record.event_type, "interview-scheduled");
        assert!(record.subject.contains("Engineer"));
        assert!(record.subject.contains("Acme"));
        assert!(record.body.contains("https://meet.example/abc"));
        // Falsy conditional section dropped
        assert!(!record.body.contains("Location:"));
        assert_eq!(record.metadata["interviewId"], "int-42");
    }

    #[tokio::test]
    async fn test_confirm_delivery_transitions_sent_record() {
        let service = service(true);
        let outcome = service
            .send("cand-1", "welcome", welcome_variables(), None)
            .await;
        let id = outcome.notification_id.unwrap();

        service.confirm_delivery(id).unwrap();

        let record = &service.get_history("cand-1", None)[0];
        assert_eq!(record.status, DeliveryStatus::Delivered);
    }
}
