//! multipart 图片上传解析
//!
//! 读取名为 `file` 的字段并完成尺寸与类型校验；
//! 缺少字段返回 400，超限或类型不符返回 413，均发生在派发命令之前。
//!
use crate::errors::ApiError;
use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use snapix_application::files::ImageUpload;

const FILE_FIELD: &str = "file";

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::new(StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large", err.body_text())
    } else {
        ApiError::bad_request(err.body_text())
    }
}

pub async fn read_image(mut multipart: Multipart) -> Result<ImageUpload, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        let original_name = field.file_name().unwrap_or_default().to_string();
        let body = field.bytes().await.map_err(multipart_error)?;

        return Ok(ImageUpload::new(body, &content_type, original_name)?);
    }

    Err(ApiError::bad_request("file is required"))
}
