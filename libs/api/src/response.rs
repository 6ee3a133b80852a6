use std::{collections::HashMap, sync::OnceLock};

use axum::{
    extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse,
    Json,
};
use repository::RepositoryError;
use serde::Serialize;
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::ApiError;

static ERROR_CODES: OnceLock<HashMap<String, String>> = OnceLock::new();

/// Body of every error response.
#[derive(Serialize, ToSchema)]
pub struct ErrorResp {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status_code, message) = match self {
            ApiError::AuthError(message) => (StatusCode::UNAUTHORIZED, message),
            ApiError::Forbidden(message) => (StatusCode::FORBIDDEN, message),
            ApiError::ClientError(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::ServerError(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        (status_code, Json(ErrorResp { error: message })).into_response()
    }
}

/// Unreadable or mistyped JSON bodies. The serde detail is logged only.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(task = "read json body", err = %rejection.body_text());
        ApiError::ClientError(error_message("400-004"))
    }
}

pub type ApiResponse<T> = Result<T, ApiError>;

/// Short public message for an error code from `error-code.json`.
pub fn error_message(error_code: &str) -> String {
    let errors = ERROR_CODES.get_or_init(|| {
        serde_json::from_str(include_str!("error-code.json")).unwrap_or_default()
    });

    errors
        .get(error_code)
        .cloned()
        .unwrap_or_else(|| error_code.to_string())
}

pub trait IntoApiResponse<T> {
    fn into_response(self, error_code: &str) -> ApiResponse<T>;
}

fn from_code(error_code: &str) -> ApiError {
    let message = error_message(error_code);

    match error_code.split('-').next() {
        Some("400") => ApiError::ClientError(message),
        Some("401") => ApiError::AuthError(message),
        Some("403") => ApiError::Forbidden(message),
        Some("404") => ApiError::NotFound(message),
        _ => ApiError::ServerError(message),
    }
}

impl<T> IntoApiResponse<T> for anyhow::Result<T> {
    fn into_response(self, error_code: &str) -> ApiResponse<T> {
        self.map_err(|e| {
            error!(error_code, "{:?}", e);
            from_code(error_code)
        })
    }
}

impl<T> IntoApiResponse<T> for Result<T, RepositoryError> {
    fn into_response(self, error_code: &str) -> ApiResponse<T> {
        self.map_err(|e| match e {
            RepositoryError::NotFound(_) => from_code("404-001"),
            e => {
                error!(error_code, "{}", e);
                from_code(error_code)
            }
        })
    }
}
