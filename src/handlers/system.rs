use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;

pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Employee API",
        "version": version,
        "endpoints": {
            "employees": "/employees (POST create, GET list, DELETE all)",
            "employee": "/employees/:email?password= (GET)",
            "manager": "/employees/:email/manager (PUT, GET, DELETE)",
            "subordinates": "/employees/:email/subordinates?page=&size= (GET)",
            "health": "/health",
        }
    }))
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.employees.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}

pub async fn not_found() -> ApiError {
    ApiError::not_found("route not found")
}
