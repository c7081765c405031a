use sha2::{Digest, Sha256};

use super::capability::CapabilitySet;
use super::registry::{CredentialRegistry, Identity};

/// Why a request was turned away. The display strings are the messages
/// returned to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Denial {
    #[error("API key is required")]
    Unauthenticated,
    #[error("Invalid API key")]
    InvalidCredential,
    #[error("Insufficient permissions")]
    InsufficientCapability,
}

/// Outcome of a single gate evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision<'a> {
    Admitted(&'a Identity),
    Denied(Denial),
}

impl<'a> Decision<'a> {
    pub fn into_result(self) -> Result<&'a Identity, Denial> {
        match self {
            Decision::Admitted(identity) => Ok(identity),
            Decision::Denied(denial) => Err(denial),
        }
    }

    pub fn is_admitted(&self) -> bool {
        matches!(self, Decision::Admitted(_))
    }
}

/// API key gate over an injected credential registry
#[derive(Debug, Clone)]
pub struct Gate {
    registry: CredentialRegistry,
}

impl Gate {
    pub fn new(registry: CredentialRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &CredentialRegistry {
        &self.registry
    }

    /// Decide whether `credential` may perform an operation demanding
    /// `required`.
    ///
    /// An empty `required` set still demands a valid key. A non-empty set is
    /// satisfied by holding any one of its capabilities.
    pub fn authorize(&self, credential: Option<&str>, required: &CapabilitySet) -> Decision<'_> {
        let key = match credential {
            Some(key) if !key.is_empty() => key,
            _ => return Decision::Denied(Denial::Unauthenticated),
        };

        let Some(identity) = self.registry.lookup(key) else {
            return Decision::Denied(Denial::InvalidCredential);
        };

        if !required.is_empty() && !identity.capabilities.intersects(required) {
            return Decision::Denied(Denial::InsufficientCapability);
        }

        Decision::Admitted(identity)
    }
}

/// Short, non-reversible tag for a credential, safe to put in logs
pub fn fingerprint(credential: &str) -> String {
    let digest = Sha256::digest(credential.as_bytes());
    digest[..4].iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::capability::Capability::{self, *};

    fn gate() -> Gate {
        Gate::new(CredentialRegistry::reference())
    }

    fn caps<const N: usize>(c: [Capability; N]) -> CapabilitySet {
        CapabilitySet::from(c)
    }

    #[test]
    fn admin_key_admitted_for_admin() {
        let gate = gate();
        let identity = gate.authorize(Some("demo-key-123"), &caps([Admin])).into_result().unwrap();
        assert_eq!(identity.display_name, "Demo User");
        assert_eq!(identity.capabilities, caps([Read, Write, Admin]));
    }

    #[test]
    fn readonly_key_denied_write() {
        assert_eq!(
            gate().authorize(Some("readonly-789"), &caps([Write])),
            Decision::Denied(Denial::InsufficientCapability)
        );
    }

    #[test]
    fn missing_or_empty_key_is_unauthenticated() {
        let gate = gate();
        assert_eq!(gate.authorize(Some(""), &caps([Read])), Decision::Denied(Denial::Unauthenticated));
        assert_eq!(gate.authorize(None, &caps([Read])), Decision::Denied(Denial::Unauthenticated));
        assert_eq!(gate.authorize(None, &CapabilitySet::empty()), Decision::Denied(Denial::Unauthenticated));
    }

    #[test]
    fn unknown_key_is_invalid() {
        let gate = gate();
        assert_eq!(gate.authorize(Some("bogus-key"), &caps([Read])), Decision::Denied(Denial::InvalidCredential));
        assert_eq!(gate.authorize(Some("bogus-key"), &CapabilitySet::empty()), Decision::Denied(Denial::InvalidCredential));
    }

    #[test]
    fn any_of_semantics() {
        let gate = gate();
        let decision = gate.authorize(Some("test-key-456"), &caps([Read, Admin]));
        assert!(decision.is_admitted());

        let decision = gate.authorize(Some("readonly-789"), &caps([Write, Admin]));
        assert_eq!(decision, Decision::Denied(Denial::InsufficientCapability));
    }

    #[test]
    fn every_key_admitted_for_empty_and_own_subsets() {
        let gate = gate();
        for (key, identity) in gate.registry().entries() {
            assert_eq!(gate.authorize(Some(key), &CapabilitySet::empty()), Decision::Admitted(identity));
            assert_eq!(gate.authorize(Some(key), &identity.capabilities), Decision::Admitted(identity));
            for cap in identity.capabilities.iter() {
                assert_eq!(gate.authorize(Some(key), &caps([cap])), Decision::Admitted(identity));
            }
        }
    }

    #[test]
    fn decisions_are_repeatable() {
        let gate = gate();
        let required = caps([Write]);
        let first = gate.authorize(Some("readonly-789"), &required);
        for _ in 0..10 {
            assert_eq!(gate.authorize(Some("readonly-789"), &required), first);
        }
    }

    #[test]
    fn injected_registry_replaces_reference() {
        let registry = CredentialRegistry::new([("only-key", Identity::new("Solo", [Write]))]).unwrap();
        let gate = Gate::new(registry);
        assert!(gate.authorize(Some("only-key"), &caps([Write])).is_admitted());
        assert_eq!(gate.authorize(Some("demo-key-123"), &caps([Read])), Decision::Denied(Denial::InvalidCredential));
    }

    #[test]
    fn denial_messages() {
        assert_eq!(Denial::Unauthenticated.to_string(), "API key is required");
        assert_eq!(Denial::InvalidCredential.to_string(), "Invalid API key");
        assert_eq!(Denial::InsufficientCapability.to_string(), "Insufficient permissions");
    }

    #[test]
    fn fingerprint_hides_key() {
        let fp = fingerprint("demo-key-123");
        assert_eq!(fp.len(), 8);
        assert!(!fp.contains("demo"));
        assert_eq!(fp, fingerprint("demo-key-123"));
        assert_ne!(fp, fingerprint("test-key-456"));
    }
}
