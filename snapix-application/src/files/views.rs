use crate::dto::Dto;
use serde::Serialize;
use snapix_domain::file::FileId;
use snapix_domain::storage::ObjectMeta;

/// 单个图片对象的对外视图
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFileView {
    pub file_id: FileId,
    pub url: String,
    pub size: u64,
    pub content_type: String,
}

impl ImageFileView {
    pub fn new(file_id: FileId, meta: &ObjectMeta) -> Self {
        Self {
            file_id,
            url: meta.url.clone(),
            size: meta.size,
            content_type: meta.content_type.clone(),
        }
    }
}

impl Dto for ImageFileView {}

/// 头像视图；用户没有头像时 `files` 为空
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AvatarViewDto {
    pub files: Vec<ImageFileView>,
}

impl Dto for AvatarViewDto {}
