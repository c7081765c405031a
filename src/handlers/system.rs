// Public home/health routes and the admin-only system info route

use axum::extract::State;
use serde_json::{json, Value};

use crate::middleware::ApiResponse;
use crate::state::AppState;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// GET / (public)
pub async fn home(State(state): State<AppState>) -> ApiResponse<Value> {
    let header = &state.config.security.api_key_header;

    let mut data = json!({
        "message": "Welcome to Comprehensive API",
        "version": VERSION,
        "authentication": format!("API Key required ({} header)", header),
        "endpoints": {
            "health": "/api/system/health (public)",
            "auth": "/api/auth/validate",
            "users": "/api/users[/:id] (read, write, admin to delete)",
            "products": "/api/products[/:id] (read, write, admin to delete)",
            "orders": "/api/orders[/:id] (read, write)",
            "analytics": "/api/analytics/* (read)",
            "files": "/api/files/* (read, write)",
            "notifications": "/api/notifications/* (read, write)",
            "system": "/api/system/info (admin)"
        }
    });

    if state.config.security.expose_sample_keys {
        let sample_keys: serde_json::Map<String, Value> = state
            .gate
            .registry()
            .entries()
            .into_iter()
            .map(|(key, identity)| {
                (
                    key.to_string(),
                    json!({ "name": identity.display_name, "permissions": identity.capabilities }),
                )
            })
            .collect();
        data["sample_keys"] = Value::Object(sample_keys);
    }

    ApiResponse::success(data)
}

/// GET /api/system/health (public)
pub async fn health(State(state): State<AppState>) -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now(),
        "version": VERSION,
        "uptime": state.uptime()
    }))
}

/// GET /api/system/info (admin)
pub async fn info(State(state): State<AppState>) -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "version": VERSION,
        "environment": state.config.environment.as_str(),
        "started_at": state.started_at,
        "uptime": state.uptime(),
        "registered_keys": state.gate.registry().len(),
        "cache": "none",
        "database": "none"
    }))
}
