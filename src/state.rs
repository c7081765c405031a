use std::sync::Arc;

use axum::http::{header::InvalidHeaderName, HeaderName};
use chrono::{DateTime, Utc};

use crate::auth::{CredentialRegistry, Gate};
use crate::config::AppConfig;

/// Shared, read-only application state handed to the router
#[derive(Clone, Debug)]
pub struct AppState {
    pub gate: Arc<Gate>,
    pub config: Arc<AppConfig>,
    pub api_key_header: HeaderName,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: AppConfig, registry: CredentialRegistry) -> Result<Self, InvalidHeaderName> {
        let api_key_header = HeaderName::try_from(config.security.api_key_header.as_str())?;

        Ok(Self {
            gate: Arc::new(Gate::new(registry)),
            config: Arc::new(config),
            api_key_header,
            started_at: Utc::now(),
        })
    }

    /// Human readable time since startup, e.g. `24h 30m`
    pub fn uptime(&self) -> String {
        format_uptime(Utc::now() - self.started_at)
    }
}

fn format_uptime(elapsed: chrono::Duration) -> String {
    let minutes = elapsed.num_minutes().max(0);
    format!("{}h {}m", minutes / 60, minutes % 60)
}
