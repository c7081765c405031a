// /api/products/* - product catalogue

use super::extract::{Json, Path, Query};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::models::Product;
use super::{merge_into, SearchQuery};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
pub struct InventoryUpdate {
    #[serde(default)]
    pub stock: i64,
}

/// GET /api/products
pub async fn list() -> ApiResponse<Vec<Product>> {
    ApiResponse::success(vec![
        Product {
            id: Some(1),
            name: Some("Laptop".into()),
            price: Some(999.99),
            category: Some("Electronics".into()),
            stock: Some(50),
            ..Default::default()
        },
        Product {
            id: Some(2),
            name: Some("Phone".into()),
            price: Some(599.99),
            category: Some("Electronics".into()),
            stock: Some(100),
            ..Default::default()
        },
    ])
}

/// POST /api/products
pub async fn create(Json(mut product): Json<Product>) -> ApiResult<Product> {
    let missing = product.missing_required();
    if !missing.is_empty() {
        return Err(ApiError::missing_fields(&missing));
    }
    product.id = product.id.or(Some(3));
    Ok(ApiResponse::created(product))
}

/// GET /api/products/:product_id
pub async fn get(Path(product_id): Path<i64>) -> ApiResponse<Product> {
    ApiResponse::success(Product {
        id: Some(product_id),
        name: Some(format!("Product {}", product_id)),
        price: Some(99.99),
        ..Default::default()
    })
}

/// PUT /api/products/:product_id - echoes the body as sent
pub async fn update(Path(product_id): Path<i64>, Json(body): Json<Map<String, Value>>) -> ApiResponse<Value> {
    ApiResponse::success(merge_into(
        json!({ "id": product_id, "message": "Product updated successfully" }),
        body,
    ))
}

/// DELETE /api/products/:product_id
pub async fn delete(Path(product_id): Path<i64>) -> ApiResponse<()> {
    tracing::info!(product_id, "product deleted");
    ApiResponse::no_content()
}

pub async fn inventory(Path(product_id): Path<i64>) -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "product_id": product_id,
        "stock": 50,
        "reserved": 5,
        "available": 45
    }))
}

pub async fn update_inventory(Path(product_id): Path<i64>, Json(body): Json<InventoryUpdate>) -> ApiResponse<Value> {
    ApiResponse::success(json!({ "product_id": product_id, "new_stock": body.stock }))
}

pub async fn reviews(Path(product_id): Path<i64>) -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "product_id": product_id,
        "reviews": [{ "rating": 5, "comment": "Great product!" }]
    }))
}

pub async fn upload_image(Path(product_id): Path<i64>) -> ApiResponse<Value> {
    ApiResponse::success(json!({ "message": format!("Image uploaded for product {}", product_id) }))
}

pub async fn categories() -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "categories": ["Electronics", "Clothing", "Books", "Home & Garden"]
    }))
}

/// GET /api/products/search?q=
pub async fn search(Query(query): Query<SearchQuery>) -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "query": query.q,
        "results": [{ "id": 1, "name": "Laptop" }]
    }))
}
