use super::new_code;
use crate::command::Command;
use crate::command_handler::CommandHandler;
use crate::context::AppContext;
use crate::error::AppError;
use crate::notification::{NotificationService, SendEmailDto};
use async_trait::async_trait;
use chrono::Utc;
use snapix_domain::persist::UserRepository;
use snapix_domain::user::Email;
use std::sync::Arc;

/// 申请找回密码：签发临时码并邮件通知
#[derive(Debug, Clone)]
pub struct RecoverPasswordCommand {
    pub email: Email,
}

impl Command for RecoverPasswordCommand {
    const NAME: &'static str = "RecoverPasswordCommand";
    type Output = ();
}

pub struct RecoverPasswordHandler {
    users: Arc<dyn UserRepository>,
    notifications: NotificationService,
}

impl RecoverPasswordHandler {
    pub fn new(users: Arc<dyn UserRepository>, notifications: NotificationService) -> Self {
        Self {
            users,
            notifications,
        }
    }
}

#[async_trait]
impl CommandHandler<RecoverPasswordCommand> for RecoverPasswordHandler {
    async fn handle(&self, _ctx: &AppContext, cmd: RecoverPasswordCommand) -> Result<(), AppError> {
        let Some(mut user) = self.users.find_by_email(&cmd.email).await? else {
            return Err(AppError::bad_request("user with this email doesn't exist"));
        };

        let code = new_code();
        let expires_at = user.issue_recovery_code(code.clone(), Utc::now());
        let user = self.users.save(user).await?;
        tracing::debug!(user_id = %user.id, %expires_at, "recovery code issued");

        self.notifications
            .send_recovery_password_temp_code(SendEmailDto {
                email: user.email,
                code,
            });
        Ok(())
    }
}
