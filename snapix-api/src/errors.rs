//! HTTP 错误翻译
//!
//! 所有失败在这里统一转换为 `{"error": code, "message": text}` 响应体；
//! 服务端错误只记录日志，不向调用方暴露细节。
//!
use crate::config::ConfigError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use snapix_application::error::AppError;
use snapix_domain::error::DomainError;
use thiserror::Error;

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "validation_error", message)
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "unauthorized", "unauthorized")
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    fn internal(err: &dyn std::error::Error) -> Self {
        tracing::error!(error = %err, "request failed");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            "internal server error",
        )
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Validation(msg) => Self::new(StatusCode::BAD_REQUEST, "validation_error", msg),
            AppError::PayloadTooLarge(msg) => {
                Self::new(StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large", msg)
            }
            AppError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, "not_found", msg),
            AppError::BadRequest(msg) => Self::new(StatusCode::BAD_REQUEST, "bad_request", msg),
            AppError::Unauthorized(msg) => Self::new(StatusCode::UNAUTHORIZED, "unauthorized", msg),
            AppError::Forbidden(msg) => Self::new(StatusCode::FORBIDDEN, "forbidden", msg),
            AppError::Domain(domain) => domain.into(),
            other => Self::internal(&other),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidValue { reason } => {
                Self::new(StatusCode::BAD_REQUEST, "validation_error", reason)
            }
            DomainError::InvalidState { reason } => {
                Self::new(StatusCode::BAD_REQUEST, "bad_request", reason)
            }
            DomainError::NotFound { reason } => Self::new(StatusCode::NOT_FOUND, "not_found", reason),
            other => Self::internal(&other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        json_error(self.status, self.code, self.message)
    }
}

/// 启动阶段错误
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    App(#[from] AppError),
}
