use super::facade::ImageFilesFacade;
use crate::command::Command;
use crate::command_handler::CommandHandler;
use crate::context::AppContext;
use crate::error::AppError;
use async_trait::async_trait;
use snapix_domain::user::UserId;

/// 删除用户头像
#[derive(Debug, Clone)]
pub struct DeleteAvatarFileCommand {
    pub owner_id: UserId,
}

impl Command for DeleteAvatarFileCommand {
    const NAME: &'static str = "DeleteAvatarFileCommand";
    type Output = ();
}

pub struct DeleteAvatarFileHandler {
    files: ImageFilesFacade,
}

impl DeleteAvatarFileHandler {
    pub fn new(files: ImageFilesFacade) -> Self {
        Self { files }
    }
}

#[async_trait]
impl CommandHandler<DeleteAvatarFileCommand> for DeleteAvatarFileHandler {
    async fn handle(&self, _ctx: &AppContext, cmd: DeleteAvatarFileCommand) -> Result<(), AppError> {
        let Some(record) = self.files.find_avatar(cmd.owner_id).await? else {
            return Err(AppError::bad_request(format!(
                "user {} has no avatar",
                cmd.owner_id
            )));
        };

        self.files.remove(&record).await?;
        tracing::info!(owner_id = %cmd.owner_id, key = %record.key, "avatar deleted");
        Ok(())
    }
}
