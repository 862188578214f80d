//! Notification records, the fixed priority table, and the orchestrating
//! service that executes sends end to end.

mod service;
mod types;

pub use service::NotificationService;
pub use types::{
    priority_for_event, ApplicationStatusUpdate, DeliveryStatus, InterviewDetails,
    NotificationRecord, Priority, SendOutcome,
};
