use crate::command::Command;
use crate::command_handler::CommandHandler;
use crate::context::AppContext;
use crate::error::AppError;
use crate::files::ImageFilesFacade;
use async_trait::async_trait;
use snapix_domain::eventing::EventBus;
use snapix_domain::eventing::bus::EventBusExt;
use snapix_domain::persist::PostRepository;
use snapix_domain::post::{PostDeleted, PostId};
use snapix_domain::user::UserId;
use std::sync::Arc;

/// 删除帖子（仅作者本人）
#[derive(Debug, Clone, Copy)]
pub struct DeletePostCommand {
    pub post_id: PostId,
    pub user_id: UserId,
}

impl Command for DeletePostCommand {
    const NAME: &'static str = "DeletePostCommand";
    type Output = ();
}

pub struct DeletePostHandler {
    posts: Arc<dyn PostRepository>,
    files: ImageFilesFacade,
    events: Arc<dyn EventBus>,
}

impl DeletePostHandler {
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
impl CommandHandler<DeletePostCommand> for DeletePostHandler {
    async fn handle(&self, ctx: &AppContext, cmd: DeletePostCommand) -> Result<(), AppError> {
        let Some(post) = self.posts.find_by_id(cmd.post_id).await? else {
            return Err(AppError::not_found(format!("post {} not found", cmd.post_id)));
        };
        if !post.is_authored_by(cmd.user_id) {
            return Err(AppError::Forbidden(format!(
                "post {} belongs to another user",
                post.id
            )));
        }

        // 图片记录可能已被单独清理，此时只删帖子；不属于该帖子的文件不动
        if let Some(image) = self.files.find_record(post.image_id).await? {
            if image.is_image_of(post.id, post.author_id) {
                self.files.remove(&image).await?;
            } else {
                tracing::warn!(post_id = %post.id, file_id = %image.id, "post image belongs elsewhere; kept");
            }
        }
        self.posts.delete_one(post.id).await?;

        let event = PostDeleted {
            post_id: post.id,
            author_id: post.author_id,
            image_id: post.image_id,
        };
        if let Err(err) = self.events.emit(&event, ctx.biz.clone()).await {
            tracing::warn!(post_id = %post.id, error = %err, "failed to publish post.delete");
        }
        Ok(())
    }
}
