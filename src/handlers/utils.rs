use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::Query;
use axum::Json;

use crate::error::ApiError;

/// Unwrap a JSON body, turning any rejection (bad syntax, wrong shape,
/// missing content type) into a 400 with `message`.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>, message: &str) -> Result<T, ApiError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            tracing::warn!("Rejected request body: {}", rejection.body_text());
            Err(ApiError::invalid_json(message))
        }
    }
}

/// Unwrap query parameters; a query string that does not deserialize
/// (e.g. a repeated key) becomes a JSON 400.
pub fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    match query {
        Ok(Query(params)) => Ok(params),
        Err(rejection) => {
            tracing::warn!("Rejected query string: {}", rejection.body_text());
            Err(ApiError::bad_request("Invalid query parameters"))
        }
    }
}
