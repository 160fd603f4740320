use super::new_code;
use crate::command::Command;
use crate::command_handler::CommandHandler;
use crate::context::AppContext;
use crate::error::AppError;
use crate::notification::{NotificationService, SendEmailDto};
use async_trait::async_trait;
use chrono::Utc;
use snapix_domain::error::DomainError;
use snapix_domain::persist::UserRepository;
use snapix_domain::user::Email;
use std::sync::Arc;

/// 重新发送注册确认邮件
#[derive(Debug, Clone)]
pub struct ResendConfirmationCodeCommand {
    pub email: Email,
}

impl Command for ResendConfirmationCodeCommand {
    const NAME: &'static str = "ResendConfirmationCodeCommand";
    type Output = ();
}

pub struct ResendConfirmationCodeHandler {
    users: Arc<dyn UserRepository>,
    notifications: NotificationService,
}

impl ResendConfirmationCodeHandler {
    pub fn new(users: Arc<dyn UserRepository>, notifications: NotificationService) -> Self {
        Self {
            users,
            notifications,
        }
    }
}

#[async_trait]
impl CommandHandler<ResendConfirmationCodeCommand> for ResendConfirmationCodeHandler {
    async fn handle(
        &self,
        _ctx: &AppContext,
        cmd: ResendConfirmationCodeCommand,
    ) -> Result<(), AppError> {
        let Some(mut user) = self.users.find_by_email(&cmd.email).await? else {
            return Err(AppError::bad_request("user with this email doesn't exist"));
        };

        let code = new_code();
        user.issue_confirmation_code(code.clone(), Utc::now())
            .map_err(|err| match err {
                DomainError::InvalidState { reason } => AppError::BadRequest(reason),
                other => other.into(),
            })?;
        let user = self.users.save(user).await?;

        self.notifications.send_email_confirmation_code(SendEmailDto {
            email: user.email,
            code,
        });
        Ok(())
    }
}
