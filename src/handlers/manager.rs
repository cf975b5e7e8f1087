use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::app::AppState;
use crate::database::models::{EmployeeView, ManagerEmail};
use crate::error::ApiResult;
use crate::filter::Pagination;

use super::utils::{json_body, query_params};

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub size: Option<String>,
}

/// PUT /employees/:email/manager - body `{"email": "<manager>"}`
pub async fn manager_put(
    State(state): State<AppState>,
    Path(email): Path<String>,
    payload: Result<Json<ManagerEmail>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let body = json_body(payload, "Invalid payload")?;
    state.managers.set_manager(&email, &body.email).await?;
    Ok(Json(json!({ "message": "Manager set successfully" })))
}

/// GET /employees/:email/manager
pub async fn manager_get(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ApiResult<Json<EmployeeView>> {
    let manager = state.managers.get_manager(&email).await?;
    Ok(Json(manager))
}

/// DELETE /employees/:email/manager
pub async fn manager_delete(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ApiResult<Json<Value>> {
    state.managers.remove_manager(&email).await?;
    Ok(Json(json!({ "message": "Manager removed successfully" })))
}

/// GET /employees/:email/subordinates?page=&size=
pub async fn subordinates_get(
    State(state): State<AppState>,
    Path(email): Path<String>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<EmployeeView>>> {
    let query = query_params(query)?;
    let page = Pagination::parse(query.page.as_deref(), query.size.as_deref())?;
    let subordinates = state.managers.get_subordinates(&email, page).await?;
    Ok(Json(subordinates))
}
