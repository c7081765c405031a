// /api/auth/* - key introspection

use axum::Extension;
use serde_json::{json, Value};

use crate::auth::Identity;
use crate::middleware::ApiResponse;

/// GET /api/auth/validate - any registered key
pub async fn validate(Extension(identity): Extension<Identity>) -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "valid": true,
        "user": identity.display_name,
        "permissions": identity.capabilities
    }))
}
