//! Snapix 基础设施层（snapix-infra）
//!
//! 领域端口的具体实现：
//! - [`memory`]：基于 `DashMap` 的仓储与对象存储，未配置数据库时及测试中使用
//! - [`postgres`]：sqlx 实现的 Postgres 仓储与建表引导
//! - [`fs_storage`]：本地文件系统对象存储
//! - [`notification`]：进程内广播的通知客户端，以及转发到 RabbitMQ / 日志的投递任务
//!
pub mod fs_storage;
pub mod memory;
pub mod notification;
pub mod postgres;

pub use fs_storage::FsObjectStorage;
pub use notification::{
    AmqpNotificationSink, BroadcastNotificationClient, LogNotificationSink, NotificationForwarder,
    NotificationMessage, NotificationSink,
};
