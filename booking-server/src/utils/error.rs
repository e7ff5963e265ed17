//! 统一错误处理
//!
//! 提供应用级错误类型 [`AppError`] 和响应别名 [`AppResult`]。
//! 所有非 2xx 响应共用一个 JSON 信封：
//!
//! ```json
//! {"error": "invalid_dates", "message": "Check-out date must be after check-in date"}
//! ```
//!
//! # 判别符
//!
//! | 判别符 | 状态码 | 说明 |
//! |--------|--------|------|
//! | validation_error | 400 | 通用输入校验失败 |
//! | invalid_dates | 400 | 日期区间非法 |
//! | invalid_guests | 400 | 人数非法 |
//! | invalid_payload | 400 | 请求体结构非法 |
//! | unauthorized | 401 | 签名/凭证校验失败 |
//! | not_found | 404 | 资源不存在 |
//! | internal_error | 500 | 内部错误 (细节只记日志) |
//!
//! 日期/人数各自独立的判别符让前端能把错误定位到正确的表单字段。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// 应用错误枚举
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== 输入错误 (4xx) ==========
    #[error("Validation failed: {0}")]
    /// 通用校验失败 (400)
    Validation(String),

    #[error("Invalid dates: {0}")]
    /// 日期区间非法 (400)
    InvalidDates(String),

    #[error("Invalid guests: {0}")]
    /// 人数非法 (400)
    InvalidGuests(String),

    #[error("Invalid request: {0}")]
    /// 请求体结构非法 (400)
    Invalid(String),

    #[error("Unauthorized: {0}")]
    /// 签名/凭证校验失败 (401)
    Unauthorized(String),

    #[error("Resource not found: {0}")]
    /// 资源不存在 (404)
    NotFound(String),

    // ========== 系统错误 (5xx) ==========
    #[error("Internal server error: {0}")]
    /// 内部错误 (500)
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg.clone()),
            AppError::InvalidDates(msg) => (StatusCode::BAD_REQUEST, "invalid_dates", msg.clone()),
            AppError::InvalidGuests(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_guests", msg.clone())
            }
            AppError::Invalid(msg) => (StatusCode::BAD_REQUEST, "invalid_payload", msg.clone()),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            AppError::Internal(msg) => {
                // 记录内部错误但不向客户端暴露细节
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details: None,
        };

        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError::Internal(e.to_string())
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_dates(msg: impl Into<String>) -> Self {
        Self::InvalidDates(msg.into())
    }

    pub fn invalid_guests(msg: impl Into<String>) -> Self {
        Self::InvalidGuests(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// 处理器的 Result 类型别名
pub type AppResult<T> = Result<T, AppError>;
