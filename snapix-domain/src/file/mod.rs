//! 文件记录聚合（头像、帖子图片）
//!
//! 文件记录描述对象存储中的一份二进制对象：归属用户、用途、存储 key 与 MIME。
//! 二进制内容本身由 [`storage`](crate::storage) 端口负责读写。
//!
use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use crate::post::PostId;
use crate::user::UserId;
use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use snapix_macros::{entity_id, value_object};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 上传图片允许的最大字节数（1 MiB + 10 字节余量）
pub const MAX_IMAGE_SIZE_BYTES: usize = 1024 * 1024 + 10;

#[entity_id]
pub struct FileId(Uuid);

impl FileId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

/// 文件用途
#[value_object]
#[derive(Copy, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum FileKind {
    Avatar,
    PostImage,
}

impl FileKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            FileKind::Avatar => "avatar",
            FileKind::PostImage => "post-image",
        }
    }

    const fn key_prefix(&self) -> &'static str {
        match self {
            FileKind::Avatar => "avatars",
            FileKind::PostImage => "posts",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "avatar" => Ok(FileKind::Avatar),
            "post-image" => Ok(FileKind::PostImage),
            other => Err(DomainError::Parse {
                reason: format!("unknown file kind: {other}"),
            }),
        }
    }
}

/// 允许上传的图片类型（仅 JPEG / PNG）
#[value_object]
#[derive(Copy, Hash)]
pub enum ImageMime {
    Jpeg,
    Png,
}

impl ImageMime {
    /// 按 MIME 字符串识别，不区分大小写；非标准的 `image/jpg` 不接受
    pub fn from_mime(mime: &str) -> DomainResult<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" => Ok(ImageMime::Jpeg),
            "image/png" => Ok(ImageMime::Png),
            other => Err(DomainError::invalid_value(format!(
                "unsupported file type '{other}', expected jpeg or png"
            ))),
        }
    }

    pub const fn as_mime(&self) -> &'static str {
        match self {
            ImageMime::Jpeg => "image/jpeg",
            ImageMime::Png => "image/png",
        }
    }

    pub const fn extension(&self) -> &'static str {
        match self {
            ImageMime::Jpeg => "jpg",
            ImageMime::Png => "png",
        }
    }
}

/// 文件记录
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: FileId,
    pub owner_id: UserId,
    pub kind: FileKind,
    /// 对象存储 key
    pub key: String,
    pub mime: ImageMime,
    pub original_name: String,
    pub size: u64,
    /// 帖子图片被帖子引用后写入
    pub post_id: Option<PostId>,
    pub created_at: DateTime<Utc>,
}

impl FileRecord {
    /// 生成对象存储 key：`{prefix}/{owner}/{file_id}.{ext}`
    pub fn storage_key(kind: FileKind, owner_id: UserId, id: FileId, mime: ImageMime) -> String {
        format!(
            "{}/{}/{}.{}",
            kind.key_prefix(),
            owner_id,
            id,
            mime.extension()
        )
    }

    /// 可被该作者用作新帖子的配图：帖子图片、本人上传、尚未被其他帖子引用
    pub fn is_claimable_by(&self, author_id: UserId) -> bool {
        self.kind == FileKind::PostImage && self.owner_id == author_id && self.post_id.is_none()
    }

    /// 是否为该帖子的配图；监听器尚未回写引用时按上传者判断
    pub fn is_image_of(&self, post_id: PostId, author_id: UserId) -> bool {
        self.kind == FileKind::PostImage
            && self
                .post_id
                .map_or(self.owner_id == author_id, |attached| attached == post_id)
    }

    pub fn attach_to_post(&mut self, post_id: PostId) -> DomainResult<()> {
        if self.kind != FileKind::PostImage {
            return Err(DomainError::InvalidState {
                reason: format!("file {} is not a post image", self.id),
            });
        }
        self.post_id = Some(post_id);
        Ok(())
    }
}

impl Entity for FileRecord {
    type Id = FileId;
    const TYPE: &'static str = "file";

    fn id(&self) -> Self::Id {
        self.id
    }
}
