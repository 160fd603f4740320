//! HTTP 路由处理：解析传输层输入、构造命令/查询、派发并塑形响应
//!
pub mod auth;
pub mod posts;
pub mod system;
pub mod users;

use crate::errors::ApiError;
use axum::Json;
use axum::extract::rejection::JsonRejection;

/// 将 JSON 解析失败统一翻译为 400
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

/// 可选文本字段：去掉首尾空白，空串视为未填写
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
