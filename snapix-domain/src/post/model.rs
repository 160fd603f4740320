use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use crate::file::FileId;
use crate::user::UserId;
use crate::value_object::{ValueObject, ensure_char_len, validated};
use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use snapix_macros::{entity_id, value_object};
use uuid::Uuid;

#[entity_id]
pub struct PostId(Uuid);

impl PostId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

/// 帖子正文：最多 500 个字符
#[value_object]
pub struct PostContent(String);

impl PostContent {
    pub fn parse(value: impl Into<String>) -> DomainResult<Self> {
        validated(Self(value.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl ValueObject for PostContent {
    type Error = DomainError;

    fn validate(&self) -> Result<(), Self::Error> {
        ensure_char_len("post content", &self.0, 0, 500)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub author_id: UserId,
    pub image_id: FileId,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 创建帖子所需的输入
#[derive(Builder, Debug, Clone)]
pub struct NewPost {
    author_id: UserId,
    image_id: FileId,
    content: Option<PostContent>,
}

impl Post {
    /// 领域工厂：分配新标识与时间戳
    pub fn create_post(input: NewPost, now: DateTime<Utc>) -> Self {
        Self {
            id: PostId::generate(),
            author_id: input.author_id,
            image_id: input.image_id,
            content: input.content.map(PostContent::into_inner),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_authored_by(&self, user_id: UserId) -> bool {
        self.author_id == user_id
    }
}

impl Entity for Post {
    type Id = PostId;
    const TYPE: &'static str = "post";

    fn id(&self) -> Self::Id {
        self.id
    }
}
