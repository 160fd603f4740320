use super::views::PostViewDto;
use crate::context::AppContext;
use crate::error::AppError;
use crate::query::Query;
use crate::query_handler::QueryHandler;
use async_trait::async_trait;
use snapix_domain::persist::PostRepository;
use snapix_domain::post::PostId;
use std::sync::Arc;

#[derive(Debug, Clone, Copy)]
pub struct GetPostQuery {
    pub post_id: PostId,
}

impl Query for GetPostQuery {
    const NAME: &'static str = "GetPostQuery";
    type Dto = PostViewDto;
}

pub struct GetPostHandler {
    posts: Arc<dyn PostRepository>,
}

impl GetPostHandler {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }
}

#[async_trait]
impl QueryHandler<GetPostQuery> for GetPostHandler {
    async fn handle(&self, _ctx: &AppContext, q: GetPostQuery) -> Result<PostViewDto, AppError> {
        self.posts
            .find_by_id(q.post_id)
            .await?
            .map(PostViewDto::from)
            .ok_or_else(|| AppError::not_found(format!("post {} not found", q.post_id)))
    }
}
