mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn get(path: &str, key: Option<&str>) -> Result<(StatusCode, Value)> {
    let server = common::ensure_server().await?;
    let mut req = common::client().get(format!("{}{}", server.base_url, path));
    if let Some(key) = key {
        req = req.header("X-API-Key", key);
    }
    let res = req.send().await?;
    let status = res.status();
    Ok((status, res.json().await?))
}

#[tokio::test]
async fn admin_key_reaches_admin_route() -> Result<()> {
    let (status, body) = get("/api/system/info", Some("demo-key-123")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["version"], env!("CARGO_PKG_VERSION"));
    Ok(())
}

#[tokio::test]
async fn readonly_key_rejected_on_write_route() -> Result<()> {
    let server = common::ensure_server().await?;
    let res = common::client()
        .put(format!("{}/api/orders/1/status", server.base_url))
        .header("X-API-Key", "readonly-789")
        .json(&json!({ "status": "shipped" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: Value = res.json().await?;
    assert_eq!(body["message"], "Insufficient permissions");
    Ok(())
}

#[tokio::test]
async fn empty_key_is_unauthenticated() -> Result<()> {
    let (status, body) = get("/api/products", Some("")).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "API key is required");

    let (status, body) = get("/api/products", None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "API key is required");
    Ok(())
}

#[tokio::test]
async fn unknown_key_is_invalid() -> Result<()> {
    let (status, body) = get("/api/products", Some("bogus-key")).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid API key");
    assert_eq!(body["code"], "UNAUTHORIZED");
    Ok(())
}

#[tokio::test]
async fn keys_are_case_sensitive() -> Result<()> {
    let (status, _) = get("/api/auth/validate", Some("DEMO-KEY-123")).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn validate_returns_identity_for_every_key() -> Result<()> {
    let expected = [
        ("demo-key-123", "Demo User", json!(["read", "write", "admin"])),
        ("test-key-456", "Test User", json!(["read", "write"])),
        ("readonly-789", "Read Only User", json!(["read"])),
    ];

    for (key, name, permissions) in expected {
        let (status, body) = get("/api/auth/validate", Some(key)).await?;
        assert_eq!(status, StatusCode::OK, "key {}", key);
        assert_eq!(body["data"]["user"], name);
        assert_eq!(body["data"]["permissions"], permissions);
    }
    Ok(())
}

#[tokio::test]
async fn public_health_ignores_bad_keys() -> Result<()> {
    let (status, _) = get("/api/system/health", Some("bogus-key")).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}
