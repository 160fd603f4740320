use super::views::PostImageViewDto;
use crate::command::Command;
use crate::command_handler::CommandHandler;
use crate::context::AppContext;
use crate::error::AppError;
use crate::files::{ImageFilesFacade, ImageUpload};
use async_trait::async_trait;
use chrono::Utc;
use snapix_domain::file::FileKind;
use snapix_domain::user::UserId;

#[derive(Debug, Clone)]
pub struct UploadPostImageCommand {
    pub owner_id: UserId,
    pub upload: ImageUpload,
}

impl Command for UploadPostImageCommand {
    const NAME: &'static str = "UploadPostImageCommand";
    type Output = PostImageViewDto;
}

pub struct UploadPostImageHandler {
    files: ImageFilesFacade,
}

impl UploadPostImageHandler {
    pub fn new(files: ImageFilesFacade) -> Self {
        Self { files }
    }
}

#[async_trait]
impl CommandHandler<UploadPostImageCommand> for UploadPostImageHandler {
    async fn handle(
        &self,
        _ctx: &AppContext,
        cmd: UploadPostImageCommand,
    ) -> Result<PostImageViewDto, AppError> {
        let (record, meta) = self
            .files
            .store(cmd.owner_id, FileKind::PostImage, cmd.upload, Utc::now())
            .await?;
        Ok(PostImageViewDto::new(record.id, &meta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Fakes;
    use bytes::Bytes;

    #[tokio::test]
    async fn stores_unattached_post_image() {
        let f = Fakes::new();
        let handler =
            UploadPostImageHandler::new(ImageFilesFacade::new(f.files.clone(), f.storage.clone()));

        let view = handler
            .handle(
                &AppContext::default(),
                UploadPostImageCommand {
                    owner_id: UserId::new(2),
                    upload: ImageUpload::new(Bytes::from_static(b"jpg"), "image/jpeg", "p.jpg")
                        .unwrap(),
                },
            )
            .await
            .unwrap();

        let records = f.files.all();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, view.image_id);
        assert_eq!(records[0].kind, FileKind::PostImage);
        assert_eq!(records[0].post_id, None);
        assert_eq!(view.content_type, "image/jpeg");
    }
}
