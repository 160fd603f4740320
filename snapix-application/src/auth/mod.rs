//! 邮箱相关的认证辅助用例：重发确认码、找回密码
//!
mod recover_password;
mod resend_confirmation_code;

pub use recover_password::{RecoverPasswordCommand, RecoverPasswordHandler};
pub use resend_confirmation_code::{ResendConfirmationCodeCommand, ResendConfirmationCodeHandler};

use uuid::Uuid;

/// 一次性验证码
pub(crate) fn new_code() -> String {
    Uuid::new_v4().simple().to_string()
}
