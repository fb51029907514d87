//! Application error type.
//!
//! Every failure that reaches a handler is an [`AppError`]: an HTTP status
//! paired with an [`anyhow::Error`]. Rendering produces the `{ "error": ... }`
//! body. Server-side failures (5xx) are logged with their full cause and the
//! client only ever sees a generic message.

use std::fmt::{Debug, Display};

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    fn with_message<M>(status: StatusCode, message: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self {
            status,
            error: Error::msg(message),
        }
    }

    /// 400 - malformed input or a violated business rule.
    pub fn bad_request<M>(message: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self::with_message(StatusCode::BAD_REQUEST, message)
    }

    /// 401 - missing or invalid credentials.
    pub fn unauthorized<M>(message: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self::with_message(StatusCode::UNAUTHORIZED, message)
    }

    /// 403 - authenticated but not allowed.
    pub fn forbidden<M>(message: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self::with_message(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found<M>(message: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self::with_message(StatusCode::NOT_FOUND, message)
    }

    /// 409 - a uniqueness rule would be broken.
    pub fn conflict<M>(message: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self::with_message(StatusCode::CONFLICT, message)
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    /// The message a client will see for this error.
    pub fn public_message(&self) -> String {
        if self.status.is_server_error() {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.error.to_string()
        }
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status.as_u16(), error = ?self.error, "Request failed");
        }

        let body = Json(json!({
            "error": self.public_message()
        }));

        (self.status, body).into_response()
    }
}
