use super::views::PostViewDto;
use crate::command::Command;
use crate::command_handler::CommandHandler;
use crate::context::AppContext;
use crate::error::AppError;
use crate::files::ImageFilesFacade;
use async_trait::async_trait;
use chrono::Utc;
use snapix_domain::eventing::EventBus;
use snapix_domain::eventing::bus::EventBusExt;
use snapix_domain::file::FileId;
use snapix_domain::persist::PostRepository;
use snapix_domain::post::{NewPost, Post, PostContent, PostCreated};
use snapix_domain::user::UserId;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct CreatePostCommand {
    pub author_id: UserId,
    pub image_id: FileId,
    pub content: Option<PostContent>,
}

impl Command for CreatePostCommand {
    const NAME: &'static str = "CreatePostCommand";
    type Output = PostViewDto;
}

pub struct CreatePostHandler {
    posts: Arc<dyn PostRepository>,
    files: ImageFilesFacade,
    events: Arc<dyn EventBus>,
}

impl CreatePostHandler {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        files: ImageFilesFacade,
        events: Arc<dyn EventBus>,
    ) -> Self {
        Self {
            posts,
            files,
            events,
        }
    }
}

#[async_trait]
impl CommandHandler<CreatePostCommand> for CreatePostHandler {
    async fn handle(&self, ctx: &AppContext, cmd: CreatePostCommand) -> Result<PostViewDto, AppError> {
        let not_found = || AppError::not_found(format!("image {} not found", cmd.image_id));
        let Some(record) = self.files.find_record(cmd.image_id).await? else {
            return Err(not_found());
        };
        if !record.is_claimable_by(cmd.author_id) {
            return Err(AppError::bad_request(format!(
                "image {} cannot be used for a new post",
                cmd.image_id
            )));
        }
        if self.files.object_of(&record).await?.is_empty() {
            return Err(not_found());
        }

        let post = Post::create_post(
            NewPost::builder()
                .author_id(cmd.author_id)
                .image_id(cmd.image_id)
                .maybe_content(cmd.content)
                .build(),
            Utc::now(),
        );
        let post = self.posts.save(post).await?;

        // 帖子已落库，事件发布失败只记录
        if let Err(err) = self
            .events
            .emit(&PostCreated { post: post.clone() }, ctx.biz.clone())
            .await
        {
            tracing::warn!(post_id = %post.id, error = %err, "failed to publish post.create");
        }

        Ok(post.into())
    }
}
