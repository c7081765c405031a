// /api/orders/* - order management

use super::extract::{Json, Path};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::merge_into;
use super::models::Order;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: Option<String>,
}

/// GET /api/orders
pub async fn list() -> ApiResponse<Vec<Order>> {
    ApiResponse::success(vec![
        Order {
            id: Some(1),
            user_id: Some(1),
            total_amount: Some(999.99),
            status: Some("completed".into()),
            ..Default::default()
        },
        Order {
            id: Some(2),
            user_id: Some(2),
            total_amount: Some(599.99),
            status: Some("pending".into()),
            ..Default::default()
        },
    ])
}

/// POST /api/orders - echoes the body over the generated id
pub async fn create(Json(body): Json<Map<String, Value>>) -> ApiResult<Value> {
    if body.get("user_id").map_or(true, Value::is_null) {
        return Err(ApiError::missing_fields(&["user_id"]));
    }
    Ok(ApiResponse::created(merge_into(
        json!({ "id": 3, "message": "Order created successfully" }),
        body,
    )))
}

/// GET /api/orders/:order_id
pub async fn get(Path(order_id): Path<i64>) -> ApiResponse<Order> {
    ApiResponse::success(Order {
        id: Some(order_id),
        user_id: Some(1),
        total_amount: Some(999.99),
        status: Some("completed".into()),
        ..Default::default()
    })
}

/// PUT /api/orders/:order_id
pub async fn update(Path(order_id): Path<i64>, Json(body): Json<Map<String, Value>>) -> ApiResponse<Value> {
    ApiResponse::success(merge_into(
        json!({ "id": order_id, "message": "Order updated successfully" }),
        body,
    ))
}

/// PUT /api/orders/:order_id/status
pub async fn update_status(Path(order_id): Path<i64>, Json(body): Json<StatusUpdate>) -> ApiResponse<Value> {
    ApiResponse::success(json!({ "order_id": order_id, "new_status": body.status }))
}

pub async fn items(Path(order_id): Path<i64>) -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "order_id": order_id,
        "items": [{ "product_id": 1, "quantity": 2, "price": 999.99 }]
    }))
}

pub async fn shipping(Path(order_id): Path<i64>) -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "order_id": order_id,
        "tracking_number": "TRK123456",
        "carrier": "DHL"
    }))
}

pub async fn payment(Path(order_id): Path<i64>) -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "order_id": order_id,
        "payment_method": "credit_card",
        "status": "paid"
    }))
}

pub async fn invoice(Path(order_id): Path<i64>) -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "order_id": order_id,
        "invoice_url": format!("/invoices/{}.pdf", order_id)
    }))
}

pub async fn statistics() -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "total_orders": 1000,
        "pending_orders": 50,
        "completed_orders": 950
    }))
}
