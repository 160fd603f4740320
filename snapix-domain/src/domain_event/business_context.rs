use crate::user::UserId;
use bon::Builder;
use serde::{Deserialize, Serialize};

/// 业务上下文：一次调用的追踪与执行主体信息
#[derive(Builder, Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessContext {
    /// 关联ID（通常为请求 ID）
    correlation_id: Option<String>,
    /// 执行主体类型（`user` / `system`）
    actor_type: Option<String>,
    /// 执行主体ID
    actor_id: Option<String>,
}

impl BusinessContext {
    /// 以已认证用户为执行主体
    pub fn for_user(user_id: UserId, correlation_id: Option<String>) -> Self {
        Self {
            correlation_id,
            actor_type: Some("user".to_string()),
            actor_id: Some(user_id.to_string()),
        }
    }

    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    pub fn actor_type(&self) -> Option<&str> {
        self.actor_type.as_deref()
    }

    pub fn actor_id(&self) -> Option<&str> {
        self.actor_id.as_deref()
    }
}
