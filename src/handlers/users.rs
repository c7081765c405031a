// /api/users/* - user management

use super::extract::{Json, Path, Query};
use serde_json::{json, Value};

use super::models::User;
use super::SearchQuery;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/users
pub async fn list() -> ApiResponse<Vec<User>> {
    ApiResponse::success(vec![
        User {
            id: Some(1),
            username: Some("john_doe".into()),
            email: Some("john@example.com".into()),
            first_name: Some("John".into()),
            last_name: Some("Doe".into()),
            ..Default::default()
        },
        User {
            id: Some(2),
            username: Some("jane_smith".into()),
            email: Some("jane@example.com".into()),
            first_name: Some("Jane".into()),
            last_name: Some("Smith".into()),
            ..Default::default()
        },
    ])
}

/// POST /api/users
pub async fn create(Json(mut user): Json<User>) -> ApiResult<User> {
    let missing = user.missing_required();
    if !missing.is_empty() {
        return Err(ApiError::missing_fields(&missing));
    }
    user.id = user.id.or(Some(3));
    tracing::info!(username = ?user.username, "user created");
    Ok(ApiResponse::created(user))
}

/// GET /api/users/:user_id
pub async fn get(Path(user_id): Path<i64>) -> ApiResponse<User> {
    ApiResponse::success(User {
        id: Some(user_id),
        username: Some(format!("user_{}", user_id)),
        email: Some(format!("user{}@example.com", user_id)),
        ..Default::default()
    })
}

/// PUT /api/users/:user_id
pub async fn update(Path(user_id): Path<i64>, Json(mut user): Json<User>) -> ApiResponse<User> {
    user.id = Some(user_id);
    ApiResponse::success(user)
}

/// DELETE /api/users/:user_id
pub async fn delete(Path(user_id): Path<i64>) -> ApiResponse<()> {
    tracing::info!(user_id, "user deleted");
    ApiResponse::no_content()
}

pub async fn profile(Path(user_id): Path<i64>) -> ApiResponse<Value> {
    ApiResponse::success(json!({ "user_id": user_id, "profile": "User profile data" }))
}

pub async fn upload_avatar(Path(user_id): Path<i64>) -> ApiResponse<Value> {
    ApiResponse::success(json!({ "message": format!("Avatar uploaded for user {}", user_id) }))
}

pub async fn preferences(Path(user_id): Path<i64>) -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "user_id": user_id,
        "preferences": { "theme": "dark", "language": "en" }
    }))
}

pub async fn activity(Path(user_id): Path<i64>) -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "user_id": user_id,
        "activities": ["login", "profile_update", "logout"]
    }))
}

/// GET /api/users/search?q=
pub async fn search(Query(query): Query<SearchQuery>) -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "query": query.q,
        "results": [{ "id": 1, "username": "john_doe" }]
    }))
}
