//! 通知投递
//!
//! 处理器经 [`BroadcastNotificationClient`] 发后即忘；组合根启动的
//! [`NotificationForwarder`] 订阅该通道，把每条消息交给 [`NotificationSink`]：
//! 配置了 `RMQ_URLS` 时为 [`AmqpNotificationSink`]，否则写入日志。
//!
mod amqp;
mod broadcast;
mod forwarder;

pub use amqp::AmqpNotificationSink;
pub use broadcast::{BroadcastNotificationClient, NotificationMessage};
pub use forwarder::{ForwarderHandle, LogNotificationSink, NotificationForwarder, NotificationSink};
