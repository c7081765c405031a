// /api/notifications/*

use super::extract::{Json, Path};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::middleware::ApiResponse;

#[derive(Debug, Default, Deserialize)]
pub struct NewNotification {
    pub title: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SendRequest {
    #[serde(default)]
    pub recipients: Vec<Value>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

pub async fn list() -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "notifications": [
            { "id": 1, "title": "New order received", "message": "Order #123 has been placed", "read": false },
            { "id": 2, "title": "Payment confirmed", "message": "Payment for order #122 confirmed", "read": true }
        ]
    }))
}

pub async fn create(Json(body): Json<NewNotification>) -> ApiResponse<Value> {
    ApiResponse::created(json!({
        "id": 3,
        "title": body.title,
        "message": body.message,
        "created_at": "2025-01-07T10:00:00Z"
    }))
}

pub async fn mark_read(Path(notification_id): Path<i64>) -> ApiResponse<Value> {
    ApiResponse::success(json!({ "notification_id": notification_id, "read": true }))
}

pub async fn send(Json(body): Json<SendRequest>) -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "message": "Notification sent successfully",
        "recipients": body.recipients,
        "type": body.kind.unwrap_or_else(|| "email".to_string())
    }))
}
