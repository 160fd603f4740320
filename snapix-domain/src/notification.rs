//! 通知端口
//!
//! 以 `{cmd, type}` 路由键向消息总线投递通知，发后即忘：
//! 调用方拿不到确认，也不感知投递失败。
//!
use serde::Serialize;
use serde_json::Value;

/// 消息路由键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RoutingKey {
    pub cmd: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl RoutingKey {
    pub const EMAIL_CONFIRMATION: RoutingKey = RoutingKey {
        cmd: "email-notification",
        kind: "confirmation",
    };

    pub const EMAIL_RECOVERY: RoutingKey = RoutingKey {
        cmd: "email-notification",
        kind: "recovery",
    };
}

impl std::fmt::Display for RoutingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.cmd, self.kind)
    }
}

pub trait NotificationClient: Send + Sync {
    fn emit(&self, routing_key: RoutingKey, payload: Value);
}
