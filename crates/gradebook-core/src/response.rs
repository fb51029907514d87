//! Success envelope shared by every handler.

use axum::{Json, http::StatusCode};
use serde::Serialize;

/// `{ "message": ..., "data": ... }`, with `data` omitted when absent.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

pub fn success<T: Serialize>(
    status: StatusCode,
    message: impl Into<String>,
    data: T,
) -> (StatusCode, Json<ApiResponse<T>>) {
    (status, Json(ApiResponse::new(message, Some(data))))
}
