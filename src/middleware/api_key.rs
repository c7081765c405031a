use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderName},
    middleware::Next,
    response::Response,
};

use crate::auth::{fingerprint, CapabilitySet, Denial, Gate};
use crate::error::ApiError;

/// Per-route gate configuration: which header to read and which
/// capabilities the route demands
#[derive(Clone, Debug)]
pub struct Requirement {
    pub gate: Arc<Gate>,
    pub header: HeaderName,
    pub required: CapabilitySet,
}

/// API key middleware. Runs the gate before the wrapped handler and, on
/// admission, injects the resolved `Identity` into request extensions.
pub async fn require_api_key(
    State(requirement): State<Requirement>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let outcome = {
        let headers = request.headers();
        match presented_key(headers, &requirement.header) {
            Ok(credential) => requirement
                .gate
                .authorize(credential, &requirement.required)
                .into_result()
                .cloned()
                .map_err(|denial| (denial, credential.map(fingerprint))),
            Err(denial) => Err((denial, None)),
        }
    };

    match outcome {
        Ok(identity) => {
            tracing::debug!(
                method = %request.method(),
                path = %request.uri().path(),
                user = %identity.display_name,
                "API key admitted"
            );
            request.extensions_mut().insert(identity);
            Ok(next.run(request).await)
        }
        Err((denial, key_fingerprint)) => {
            tracing::warn!(
                method = %request.method(),
                path = %request.uri().path(),
                required = %requirement.required,
                key = key_fingerprint.as_deref().unwrap_or("-"),
                reason = %denial,
                "API key rejected"
            );
            Err(denial.into())
        }
    }
}

/// Read the API key header. A value that is not valid UTF-8 can never match
/// a registered key.
fn presented_key<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Result<Option<&'a str>, Denial> {
    match headers.get(name) {
        None => Ok(None),
        Some(value) => std::str::from_utf8(value.as_bytes())
            .map(Some)
            .map_err(|_| Denial::InvalidCredential),
    }
}
