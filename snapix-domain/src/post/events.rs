use super::model::{Post, PostId};
use crate::domain_event::DomainEvent;
use crate::entity::Entity;
use crate::file::FileId;
use crate::user::UserId;
use serde::{Deserialize, Serialize};

/// 帖子已创建（携带持久化后的帖子）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostCreated {
    pub post: Post,
}

impl DomainEvent for PostCreated {
    const EVENT_TYPE: &'static str = "post.create";

    fn aggregate_type(&self) -> &'static str {
        Post::TYPE
    }

    fn aggregate_id(&self) -> String {
        self.post.id.to_string()
    }
}

/// 帖子已删除
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDeleted {
    pub post_id: PostId,
    pub author_id: UserId,
    pub image_id: FileId,
}

impl DomainEvent for PostDeleted {
    const EVENT_TYPE: &'static str = "post.delete";

    fn aggregate_type(&self) -> &'static str {
        Post::TYPE
    }

    fn aggregate_id(&self) -> String {
        self.post_id.to_string()
    }
}
