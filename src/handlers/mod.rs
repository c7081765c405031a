// handlers/mod.rs - route handlers grouped by resource
//
// Handlers assume the API key gate already ran; the ones that need the caller
// take `Extension<Identity>`. Payloads are fixed or echoed from the request.

pub mod analytics;
pub mod auth;
pub mod extract;
pub mod files;
pub mod models;
pub mod notifications;
pub mod orders;
pub mod products;
pub mod system;
pub mod users;

use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Overlay `body` on top of `base`; request fields win on conflict
pub(crate) fn merge_into(mut base: Value, body: Map<String, Value>) -> Value {
    if let Value::Object(ref mut map) = base {
        map.extend(body);
    }
    base
}
