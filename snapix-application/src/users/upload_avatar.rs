use crate::command::Command;
use crate::command_handler::CommandHandler;
use crate::context::AppContext;
use crate::error::AppError;
use crate::files::{AvatarViewDto, ImageFileView, ImageFilesFacade, ImageUpload};
use async_trait::async_trait;
use chrono::Utc;
use snapix_domain::file::FileKind;
use snapix_domain::user::UserId;

/// 上传（替换）头像
#[derive(Debug, Clone)]
pub struct UploadAvatarCommand {
    pub owner_id: UserId,
    pub upload: ImageUpload,
}

impl Command for UploadAvatarCommand {
    const NAME: &'static str = "UploadAvatarCommand";
    type Output = AvatarViewDto;
}

pub struct UploadAvatarHandler {
    files: ImageFilesFacade,
}

impl UploadAvatarHandler {
    pub fn new(files: ImageFilesFacade) -> Self {
        Self { files }
    }
}

#[async_trait]
impl CommandHandler<UploadAvatarCommand> for UploadAvatarHandler {
    async fn handle(
        &self,
        _ctx: &AppContext,
        cmd: UploadAvatarCommand,
    ) -> Result<AvatarViewDto, AppError> {
        // 每个用户只保留一个头像：先删旧的再存新的，中途失败不回滚
        if let Some(previous) = self.files.find_avatar(cmd.owner_id).await? {
            self.files.remove(&previous).await?;
            tracing::debug!(owner_id = %cmd.owner_id, key = %previous.key, "previous avatar removed");
        }

        let (record, meta) = self
            .files
            .store(cmd.owner_id, FileKind::Avatar, cmd.upload, Utc::now())
            .await?;

        Ok(AvatarViewDto {
            files: vec![ImageFileView::new(record.id, &meta)],
        })
    }
}
