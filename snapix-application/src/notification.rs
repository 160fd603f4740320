//! 通知服务：向通知中心投递邮件类消息
//!
use serde::Serialize;
use snapix_domain::notification::{NotificationClient, RoutingKey};
use std::sync::Arc;

/// 邮件通知载荷
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendEmailDto {
    pub email: String,
    pub code: String,
}

#[derive(Clone)]
pub struct NotificationService {
    client: Arc<dyn NotificationClient>,
}

impl NotificationService {
    pub fn new(client: Arc<dyn NotificationClient>) -> Self {
        Self { client }
    }

    pub fn send_email_confirmation_code(&self, dto: SendEmailDto) {
        self.send(RoutingKey::EMAIL_CONFIRMATION, dto);
    }

    pub fn send_recovery_password_temp_code(&self, dto: SendEmailDto) {
        self.send(RoutingKey::EMAIL_RECOVERY, dto);
    }

    fn send(&self, routing_key: RoutingKey, dto: SendEmailDto) {
        match serde_json::to_value(&dto) {
            Ok(payload) => self.client.emit(routing_key, payload),
            Err(err) => {
                tracing::warn!(%routing_key, error = %err, "notification payload not serializable")
            }
        }
    }
}
