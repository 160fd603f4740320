use crate::files::ImageFilesFacade;
use async_trait::async_trait;
use snapix_domain::domain_event::{DomainEvent, EventEnvelope};
use snapix_domain::error::{DomainError, DomainResult};
use snapix_domain::eventing::{EventHandler, HandledEventType};
use snapix_domain::post::PostCreated;

/// `post.create` 监听器：把帖子引用的图片记录标记为已关联
pub struct AttachPostImageListener {
    files: ImageFilesFacade,
}

impl AttachPostImageListener {
    pub fn new(files: ImageFilesFacade) -> Self {
        Self { files }
    }
}

#[async_trait]
impl EventHandler for AttachPostImageListener {
    fn handler_name(&self) -> &str {
        "attach-post-image"
    }

    fn handled_event_type(&self) -> HandledEventType {
        HandledEventType::One(PostCreated::EVENT_TYPE)
    }

    async fn handle(&self, event: &EventEnvelope) -> DomainResult<()> {
        let PostCreated { post } = event.decode()?;
        let failed = |err: crate::error::AppError| DomainError::EventHandler {
            handler: self.handler_name().to_string(),
            reason: err.to_string(),
        };

        let Some(mut record) = self.files.find_record(post.image_id).await.map_err(failed)? else {
            return Err(DomainError::not_found(format!(
                "image {} of post {} not found",
                post.image_id, post.id
            )));
        };
        record.attach_to_post(post.id)?;
        self.files.save_record(record).await.map_err(failed)?;

        tracing::debug!(post_id = %post.id, image_id = %post.image_id, "post image attached");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Fakes;
    use chrono::Utc;
    use snapix_domain::domain_event::BusinessContext;
    use snapix_domain::file::{FileId, FileKind};
    use snapix_domain::post::{NewPost, Post};
    use snapix_domain::user::UserId;

    fn created(image_id: FileId) -> EventEnvelope {
        let post = Post::create_post(
            NewPost::builder()
                .author_id(UserId::new(1))
                .image_id(image_id)
                .build(),
            Utc::now(),
        );
        EventEnvelope::new(&PostCreated { post }, BusinessContext::default()).unwrap()
    }

    #[tokio::test]
    async fn marks_image_record_with_post_id() {
        let f = Fakes::new();
        let image = f.seed_image(UserId::new(1), FileKind::PostImage);
        let listener =
            AttachPostImageListener::new(ImageFilesFacade::new(f.files.clone(), f.storage.clone()));

        let env = created(image.id);
        listener.handle(&env).await.unwrap();

        let PostCreated { post } = env.decode().unwrap();
        assert_eq!(f.files.all()[0].post_id, Some(post.id));
    }

    #[tokio::test]
    async fn missing_image_fails() {
        let f = Fakes::new();
        let listener =
            AttachPostImageListener::new(ImageFilesFacade::new(f.files.clone(), f.storage.clone()));
        let err = listener.handle(&created(FileId::generate())).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
