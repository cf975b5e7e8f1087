use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::app::AppState;
use crate::database::models::{Employee, EmployeeView};
use crate::error::{ApiError, ApiResult};
use crate::filter::{Criterion, Pagination};

use super::utils::{json_body, query_params};

#[derive(Debug, Deserialize)]
pub struct CredentialQuery {
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// byEmailDomain, byRole, byAge; anything else lists everyone
    pub criteria: Option<String>,
    pub value: Option<String>,
    pub page: Option<String>,
    pub size: Option<String>,
}

/// POST /employees - validate and store a new employee
pub async fn employee_post(
    State(state): State<AppState>,
    payload: Result<Json<Employee>, JsonRejection>,
) -> ApiResult<Json<EmployeeView>> {
    let employee = json_body(payload, "Invalid request payload")?;
    let created = state.employees.create_employee(employee).await?;
    Ok(Json(created))
}

/// GET /employees/:email?password= - fetch one employee by credentials
pub async fn employee_get(
    State(state): State<AppState>,
    Path(email): Path<String>,
    query: Result<Query<CredentialQuery>, QueryRejection>,
) -> ApiResult<Json<EmployeeView>> {
    let query = query_params(query)?;
    let password = query.password.unwrap_or_default();
    if email.is_empty() || password.is_empty() {
        return Err(ApiError::bad_request("Missing email or password"));
    }

    let employee = state.employees.get_employee(&email, &password).await?;
    Ok(Json(employee))
}

/// GET /employees?criteria=&value=&page=&size= - list, filter and paginate
pub async fn employees_list(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<EmployeeView>>> {
    let query = query_params(query)?;
    let page = Pagination::parse(query.page.as_deref(), query.size.as_deref())?;
    let criterion = Criterion::parse(query.criteria.as_deref(), query.value.as_deref())?;

    tracing::debug!("Listing employees by {:?}, page {} size {}", criterion, page.page(), page.size());
    let employees = state
        .employees
        .list_employees(&criterion, page, Utc::now())
        .await?;
    Ok(Json(employees))
}

/// DELETE /employees - remove every employee
pub async fn employees_delete(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    state.employees.delete_all().await?;
    Ok(Json(json!({ "message": "All employees deleted" })))
}
