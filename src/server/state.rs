use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::Settings;
use crate::notification::NotificationService;
use crate::template::default_templates;
use crate::transport::create_transport;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub service: Arc<NotificationService>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let transport = create_transport(&settings.transport);
        let service = NotificationService::new(
            transport,
            Duration::from_millis(settings.transport.timeout_ms),
        )
        .with_default_query_limit(settings.history.default_query_limit);

        // Seed the built-in template set; callers may replace it later
        if let Err(e) = service.register_templates(default_templates()) {
            tracing::error!(error = %e, "Failed to register built-in templates");
        }

        Self {
            settings: Arc::new(settings),
            service: Arc::new(service),
            start_time: Instant::now(),
        }
    }
}
