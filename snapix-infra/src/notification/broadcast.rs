//! 进程内广播通道：业务侧发后即忘，转发任务订阅后投递到外部
//!
use serde::Serialize;
use serde_json::Value;
use snapix_domain::notification::{NotificationClient, RoutingKey};
use tokio::sync::broadcast;

/// 投递到总线上的一条消息
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationMessage {
    pub pattern: RoutingKey,
    pub data: Value,
}

pub struct BroadcastNotificationClient {
    sender: broadcast::Sender<NotificationMessage>,
}

impl BroadcastNotificationClient {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NotificationMessage> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastNotificationClient {
    fn default() -> Self {
        Self::new(256)
    }
}

impl NotificationClient for BroadcastNotificationClient {
    fn emit(&self, routing_key: RoutingKey, payload: Value) {
        let message = NotificationMessage {
            pattern: routing_key,
            data: payload,
        };
        if self.sender.send(message).is_err() {
            tracing::warn!(%routing_key, "notification dropped: no subscribers");
        }
    }
}
