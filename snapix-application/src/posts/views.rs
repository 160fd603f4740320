use crate::dto::Dto;
use chrono::{DateTime, Utc};
use serde::Serialize;
use snapix_domain::file::FileId;
use snapix_domain::post::{Post, PostId};
use snapix_domain::storage::ObjectMeta;
use snapix_domain::user::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostViewDto {
    pub id: PostId,
    pub image_id: FileId,
    pub content: Option<String>,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostViewDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            image_id: post.image_id,
            content: post.content,
            author_id: post.author_id,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

impl Dto for PostViewDto {}

/// 上传后的帖子图片；`image_id` 用于随后的发帖请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostImageViewDto {
    pub image_id: FileId,
    pub url: String,
    pub size: u64,
    pub content_type: String,
}

impl PostImageViewDto {
    pub fn new(image_id: FileId, meta: &ObjectMeta) -> Self {
        Self {
            image_id,
            url: meta.url.clone(),
            size: meta.size,
            content_type: meta.content_type.clone(),
        }
    }
}

impl Dto for PostImageViewDto {}
