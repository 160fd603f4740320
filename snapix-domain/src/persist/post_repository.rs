use crate::error::DomainResult;
use crate::post::{Post, PostId};
use async_trait::async_trait;

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn save(&self, post: Post) -> DomainResult<Post>;

    async fn find_by_id(&self, id: PostId) -> DomainResult<Option<Post>>;

    async fn delete_one(&self, id: PostId) -> DomainResult<bool>;
}
