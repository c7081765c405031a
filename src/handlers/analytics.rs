// /api/analytics/* - fixed reporting figures

use super::extract::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::middleware::ApiResponse;

#[derive(Debug, Default, Deserialize)]
pub struct ReportRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportRequest {
    pub format: Option<String>,
}

pub async fn dashboard() -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "total_users": 1000,
        "total_products": 500,
        "total_orders": 2000,
        "revenue": 50000.00
    }))
}

pub async fn sales() -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "daily_sales": [100, 150, 200, 180, 220],
        "monthly_sales": [3000, 3500, 4000, 4200],
        "top_products": [{ "id": 1, "name": "Laptop", "sales": 50 }]
    }))
}

pub async fn users() -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "new_users": [10, 15, 20, 18, 22],
        "active_users": [800, 850, 900, 920],
        "user_retention": 0.85
    }))
}

pub async fn traffic() -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "page_views": [1000, 1200, 1500, 1300],
        "unique_visitors": [500, 600, 750, 650],
        "bounce_rate": 0.35
    }))
}

pub async fn revenue() -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "daily_revenue": [1000, 1500, 2000, 1800],
        "monthly_revenue": [30000, 35000, 40000, 42000],
        "revenue_by_category": { "Electronics": 25000, "Clothing": 15000 }
    }))
}

pub async fn conversion() -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "conversion_rate": 0.05,
        "funnel_data": [1000, 500, 250, 50],
        "conversion_by_source": { "organic": 0.06, "paid": 0.04 }
    }))
}

pub async fn performance() -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "page_load_time": 2.5,
        "api_response_time": 150,
        "error_rate": 0.01
    }))
}

/// POST /api/analytics/reports
pub async fn generate_report(Json(body): Json<ReportRequest>) -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "report_id": "RPT123456",
        "type": body.kind.unwrap_or_else(|| "sales".to_string()),
        "status": "generating"
    }))
}

/// POST /api/analytics/export
pub async fn export(Json(body): Json<ExportRequest>) -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "export_id": "EXP123456",
        "format": body.format.unwrap_or_else(|| "csv".to_string()),
        "download_url": "/downloads/analytics_export.csv"
    }))
}

pub async fn alerts() -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "alerts": [
            { "type": "revenue_drop", "message": "Revenue dropped by 10%", "severity": "medium" },
            { "type": "traffic_spike", "message": "Traffic increased by 50%", "severity": "low" }
        ]
    }))
}
