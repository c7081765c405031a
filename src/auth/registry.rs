use std::collections::HashMap;

use serde::Serialize;

use super::capability::{Capability, CapabilitySet};

/// Resolved principal behind a valid API key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub display_name: String,
    pub capabilities: CapabilitySet,
}

impl Identity {
    pub fn new(display_name: impl Into<String>, capabilities: impl Into<CapabilitySet>) -> Self {
        Self {
            display_name: display_name.into(),
            capabilities: capabilities.into(),
        }
    }

    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities.contains(capability)
    }
}

/// Immutable mapping from API key to identity.
///
/// Built once at startup and never mutated afterwards; there is no insert,
/// remove or reload operation.
#[derive(Debug, Clone, Default)]
pub struct CredentialRegistry {
    entries: HashMap<String, Identity>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("API key must not be empty")]
    EmptyKey,
    #[error("API key '{0}' is registered more than once")]
    DuplicateKey(String),
}

impl CredentialRegistry {
    /// Build a registry, rejecting empty or duplicated keys
    pub fn new<I, K>(entries: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (K, Identity)>,
        K: Into<String>,
    {
        let mut map = HashMap::new();
        for (key, identity) in entries {
            let key = key.into();
            if key.is_empty() {
                return Err(RegistryError::EmptyKey);
            }
            if map.contains_key(&key) {
                return Err(RegistryError::DuplicateKey(key));
            }
            map.insert(key, identity);
        }
        Ok(Self { entries: map })
    }

    /// The three demonstration keys shipped with the service
    pub fn reference() -> Self {
        use Capability::*;

        let mut entries = HashMap::new();
        entries.insert("demo-key-123".to_string(), Identity::new("Demo User", [Read, Write, Admin]));
        entries.insert("test-key-456".to_string(), Identity::new("Test User", [Read, Write]));
        entries.insert("readonly-789".to_string(), Identity::new("Read Only User", [Read]));
        Self { entries }
    }

    pub fn lookup(&self, key: &str) -> Option<&Identity> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by key, for listings
    pub fn entries(&self) -> Vec<(&str, &Identity)> {
        let mut out: Vec<(&str, &Identity)> = self
            .entries
            .iter()
            .map(|(k, v)| (k.as_str(), v))
            .collect();
        out.sort_by(|a, b| a.0.cmp(b.0));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_registry_has_three_tiers() {
        let registry = CredentialRegistry::reference();
        assert_eq!(registry.len(), 3);

        let demo = registry.lookup("demo-key-123").unwrap();
        assert_eq!(demo.display_name, "Demo User");
        assert!(demo.has(Capability::Admin));

        let test = registry.lookup("test-key-456").unwrap();
        assert!(test.has(Capability::Write));
        assert!(!test.has(Capability::Admin));

        let readonly = registry.lookup("readonly-789").unwrap();
        assert_eq!(readonly.capabilities.len(), 1);
        assert!(readonly.has(Capability::Read));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let registry = CredentialRegistry::reference();
        assert!(registry.lookup("DEMO-KEY-123").is_none());
        assert!(registry.lookup(" demo-key-123").is_none());
    }

    #[test]
    fn new_rejects_bad_entries() {
        let dup = CredentialRegistry::new([
            ("k", Identity::new("A", [Capability::Read])),
            ("k", Identity::new("B", [Capability::Write])),
        ]);
        assert_eq!(dup.unwrap_err(), RegistryError::DuplicateKey("k".into()));

        let empty = CredentialRegistry::new([("", Identity::new("A", [Capability::Read]))]);
        assert_eq!(empty.unwrap_err(), RegistryError::EmptyKey);
    }

    #[test]
    fn entries_are_sorted() {
        let registry = CredentialRegistry::reference();
        let keys: Vec<&str> = registry.entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["demo-key-123", "readonly-789", "test-key-456"]);
    }
}
