// API key authentication: capability vocabulary, credential registry and the
// gate that turns a presented key into an authorization decision.

pub mod capability;
pub mod gate;
pub mod registry;

pub use capability::{Capability, CapabilitySet, UnknownCapability};
pub use gate::{fingerprint, Decision, Denial, Gate};
pub use registry::{CredentialRegistry, Identity, RegistryError};
