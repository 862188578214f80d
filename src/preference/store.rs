//! Per-recipient preference storage

use dashmap::DashMap;

use super::types::Preference;

/// In-memory preference storage keyed by recipient.
///
/// Records are created on first explicit set and replaced wholesale on
/// every subsequent set.
pub struct PreferenceStore {
    preferences: DashMap<String, Preference>,
}

impl Default for PreferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceStore {
    /// Create an empty preference store
    pub fn new() -> Self {
        Self {
            preferences: DashMap::new(),
        }
    }

    /// Set (replace, not patch) a recipient's preferences
    pub fn set(&self, preference: Preference) {
        tracing::debug!(
            recipient_id = %preference.recipient_id,
            enabled_global = preference.enabled_global,
            "Preferences set"
        );
        self.preferences
            .insert(preference.recipient_id.clone(), preference);
    }

    /// Resolve a recipient's preferences, if any were ever set
    pub fn resolve(&self, recipient_id: &str) -> Option<Preference> {
        self.preferences.get(recipient_id).map(|p| p.clone())
    }

    /// Number of recipients with a stored preference record
    pub fn count(&self) -> usize {
        self.preferences.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_absent_is_none() {
        let store = PreferenceStore::new();
        assert!(store.resolve("cand-1").is_none());
    }

    #[test]
    fn test_set_and_resolve() {
        let store = PreferenceStore::new();
        store.set(Preference::new("cand-1", "cand@example.com"));

        let pref = store.resolve("cand-1").unwrap();
        assert_eq!(pref.email, "cand@example.com");
    }

    #[test]
    fn test_set_replaces_wholesale() {
        let store = PreferenceStore::new();

        let mut first = Preference::new("cand-1", "cand@example.com");
        first.per_type_toggles.insert("rejection".to_string(), false);
        store.set(first);

        // A later set with no toggles clears the earlier opt-out
        store.set(Preference::new("cand-1", "new@example.com"));

        let pref = store.resolve("cand-1").unwrap();
        assert_eq!(pref.email, "new@example.com");
        assert!(pref.per_type_toggles.is_empty());
    }
}
