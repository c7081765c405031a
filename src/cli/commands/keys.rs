use serde_json::json;

use crate::auth::{CapabilitySet, CredentialRegistry, Decision, Gate};
use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;

/// `keys`: list the reference registry
pub fn list(output_format: OutputFormat) -> anyhow::Result<()> {
    let registry = CredentialRegistry::reference();

    match output_format {
        OutputFormat::Json => {
            let keys: Vec<_> = registry
                .entries()
                .into_iter()
                .map(|(key, identity)| {
                    json!({
                        "key": key,
                        "name": identity.display_name,
                        "permissions": identity.capabilities
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&json!({ "keys": keys }))?);
        }
        OutputFormat::Text => {
            println!("{:<16} {:<16} PERMISSIONS", "KEY", "NAME");
            for (key, identity) in registry.entries() {
                println!("{:<16} {:<16} {}", key, identity.display_name, identity.capabilities);
            }
        }
    }
    Ok(())
}

/// `check`: run the gate locally against the reference registry.
/// Returns whether the key was admitted.
pub fn check(key: &str, require: &str, output_format: OutputFormat) -> anyhow::Result<bool> {
    let required = CapabilitySet::parse_list(require)?;
    let gate = Gate::new(CredentialRegistry::reference());

    match gate.authorize(Some(key), &required) {
        Decision::Admitted(identity) => {
            output_success(
                &output_format,
                &format!("Admitted as {} ({})", identity.display_name, identity.capabilities),
                Some(json!({
                    "user": identity.display_name,
                    "permissions": identity.capabilities,
                    "required": required
                })),
            )?;
            Ok(true)
        }
        Decision::Denied(denial) => {
            output_error(&output_format, &denial.to_string(), Some(&format!("{:?}", denial)))?;
            Ok(false)
        }
    }
}
