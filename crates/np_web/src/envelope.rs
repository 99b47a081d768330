//! Uniform `{success, data|error, message}` response envelope shared by
//! every route.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

pub fn success(data: Value) -> Response {
    Json(json!({ "success": true, "data": data })).into_response()
}

pub fn success_message(message: &str, data: Value) -> Response {
    Json(json!({ "success": true, "message": message, "data": data })).into_response()
}

pub fn failure(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "success": false, "message": message }))).into_response()
}

pub fn failure_detail(status: StatusCode, error: &str, message: &str) -> Response {
    (
        status,
        Json(json!({ "success": false, "error": error, "message": message })),
    )
        .into_response()
}
