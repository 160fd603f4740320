//! 事件总线（EventBus）协议
//!
//! 定义事件发布与订阅的统一抽象，订阅返回 'static 生命周期事件流，
//! 以便在异步运行时（如 tokio::spawn）中消费。
//!
use crate::domain_event::{BusinessContext, DomainEvent, EventEnvelope};
use crate::error::DomainResult as Result;
use async_trait::async_trait;
use futures_core::stream::BoxStream;

/// 事件总线：负责分发事件与订阅事件流
#[async_trait]
pub trait EventBus: Send + Sync {
    async fn publish(&self, event: &EventEnvelope) -> Result<()>;

    /// 返回一个 'static 生命周期的事件流，便于在 tokio::spawn 中使用
    async fn subscribe(&self) -> BoxStream<'static, Result<EventEnvelope>>;
}

/// 便捷扩展：直接发布具体领域事件
#[async_trait]
pub trait EventBusExt: EventBus {
    async fn emit<E: DomainEvent>(&self, event: &E, context: BusinessContext) -> Result<()> {
        let envelope = EventEnvelope::new(event, context)?;
        self.publish(&envelope).await
    }
}

impl<T: EventBus + ?Sized> EventBusExt for T {}
