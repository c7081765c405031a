// /api/files/* - file metadata (no storage behind it)

use super::extract::{Json, Path};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::middleware::ApiResponse;

const DEFAULT_SHARE_EXPIRY: &str = "2025-01-14T10:00:00Z";

#[derive(Debug, Default, Deserialize)]
pub struct ShareRequest {
    pub expires_at: Option<String>,
}

pub async fn upload() -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "file_id": "FILE123456",
        "filename": "document.pdf",
        "size": 1024000,
        "url": "/files/FILE123456"
    }))
}

pub async fn get(Path(file_id): Path<String>) -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "file_id": file_id,
        "filename": "document.pdf",
        "size": 1024000,
        "uploaded_at": "2025-01-07T10:00:00Z"
    }))
}

pub async fn delete(Path(file_id): Path<String>) -> ApiResponse<()> {
    tracing::info!(%file_id, "file deleted");
    ApiResponse::no_content()
}

pub async fn download(Path(file_id): Path<String>) -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "download_url": format!("/downloads/{}", file_id),
        "expires_at": "2025-01-07T11:00:00Z"
    }))
}

pub async fn list() -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "files": [
            { "file_id": "FILE123456", "filename": "document.pdf", "size": 1024000 },
            { "file_id": "FILE789012", "filename": "image.jpg", "size": 512000 }
        ],
        "total": 2
    }))
}

pub async fn share(Path(file_id): Path<String>, Json(body): Json<ShareRequest>) -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "share_url": format!("/shared/{}", file_id),
        "expires_at": body.expires_at.unwrap_or_else(|| DEFAULT_SHARE_EXPIRY.to_string())
    }))
}
