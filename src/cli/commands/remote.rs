use anyhow::Context;
use serde_json::Value;

use crate::cli::config::{load_config, CliConfig};
use crate::cli::utils::{output_body, output_error};
use crate::cli::OutputFormat;

/// Resolve the server URL: explicit flag, then saved config
fn resolve_url(url: Option<String>) -> anyhow::Result<String> {
    let url = match url {
        Some(url) => url,
        None => load_config()?.url,
    };
    Ok(url.trim_end_matches('/').to_string())
}

/// `health`: GET /api/system/health
pub async fn health(url: Option<String>, output_format: OutputFormat) -> anyhow::Result<bool> {
    let base = resolve_url(url)?;
    let res = reqwest::Client::new()
        .get(format!("{}/api/system/health", base))
        .send()
        .await
        .with_context(|| format!("failed to reach {}", base))?;

    report(res, &output_format).await
}

/// Flags win over saved settings
fn resolve_credentials(key: Option<String>, header: Option<String>, saved: &CliConfig) -> (Option<String>, String) {
    let key = key.or_else(|| saved.api_key.clone());
    let header = header.unwrap_or_else(|| saved.header_name().to_string());
    (key, header)
}

/// `validate`: GET /api/auth/validate with the given or saved key
pub async fn validate(
    url: Option<String>,
    key: Option<String>,
    header: Option<String>,
    output_format: OutputFormat,
) -> anyhow::Result<bool> {
    let base = resolve_url(url)?;
    let (key, header) = resolve_credentials(key, header, &load_config()?);

    let mut req = reqwest::Client::new().get(format!("{}/api/auth/validate", base));
    if let Some(key) = key {
        req = req.header(header.as_str(), key);
    }
    let res = req.send().await.with_context(|| format!("failed to reach {}", base))?;

    report(res, &output_format).await
}

async fn report(res: reqwest::Response, output_format: &OutputFormat) -> anyhow::Result<bool> {
    let status = res.status();
    let body: Value = res.json().await.context("server returned a non-JSON body")?;

    if status.is_success() {
        output_body(output_format, &body)?;
        Ok(true)
    } else {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("request failed");
        output_error(output_format, &format!("{} ({})", message, status), body.get("code").and_then(Value::as_str))?;
        Ok(false)
    }
}
