//! Recipient delivery preferences and the gating policy applied before a
//! send reaches the template and transport layers.

mod policy;
mod store;
mod types;

pub use policy::{is_allowed, toggle_key, PolicyDecision};
pub use store::PreferenceStore;
pub use types::{Frequency, Preference, QuietHours};
