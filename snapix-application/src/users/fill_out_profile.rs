use super::views::UserProfileViewDto;
use crate::command::Command;
use crate::command_handler::CommandHandler;
use crate::context::AppContext;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use snapix_domain::persist::UserRepository;
use snapix_domain::user::{ProfileDetails, UserId};
use std::sync::Arc;

/// 填写（覆盖）个人资料；`details` 已在接口层完成校验
#[derive(Debug, Clone)]
pub struct FillOutProfileCommand {
    pub user_id: UserId,
    pub details: ProfileDetails,
}

impl Command for FillOutProfileCommand {
    const NAME: &'static str = "FillOutProfileCommand";
    type Output = UserProfileViewDto;
}

pub struct FillOutProfileHandler {
    users: Arc<dyn UserRepository>,
}

impl FillOutProfileHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl CommandHandler<FillOutProfileCommand> for FillOutProfileHandler {
    async fn handle(
        &self,
        _ctx: &AppContext,
        cmd: FillOutProfileCommand,
    ) -> Result<UserProfileViewDto, AppError> {
        let Some(mut user) = self.users.find_by_id(cmd.user_id).await? else {
            return Err(AppError::not_found(format!("user {} not found", cmd.user_id)));
        };

        user.fill_out(cmd.details, Utc::now());
        let saved = self.users.save(user).await?;
        Ok(saved.into())
    }
}
