use crate::error::{AppError, AppResult};
use bytes::Bytes;
use snapix_domain::file::{ImageMime, MAX_IMAGE_SIZE_BYTES};

/// 通过尺寸与类型校验的上传图片
///
/// 只能经 [`ImageUpload::new`] 构造，处理器因此无需重复校验。
#[derive(Debug, Clone)]
pub struct ImageUpload {
    body: Bytes,
    mime: ImageMime,
    original_name: String,
}

impl ImageUpload {
    /// 超过上限或类型不是 JPEG/PNG 时返回 `PayloadTooLarge`（413）
    pub fn new(
        body: Bytes,
        content_type: &str,
        original_name: impl Into<String>,
    ) -> AppResult<Self> {
        if body.len() > MAX_IMAGE_SIZE_BYTES {
            return Err(AppError::PayloadTooLarge(format!(
                "file exceeds {MAX_IMAGE_SIZE_BYTES} bytes"
            )));
        }
        let mime = ImageMime::from_mime(content_type)
            .map_err(|e| AppError::PayloadTooLarge(e.to_string()))?;

        Ok(Self {
            body,
            mime,
            original_name: original_name.into(),
        })
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn mime(&self) -> ImageMime {
        self.mime
    }

    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    pub fn size(&self) -> u64 {
        self.body.len() as u64
    }
}
