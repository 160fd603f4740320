use super::business_context::BusinessContext;
use super::domain_event_trait::DomainEvent;
use super::metadata::Metadata;
use crate::error::{DomainError, DomainResult};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// 事件信封：序列化后的事件载荷、元数据与业务上下文
///
/// 事件总线只传输信封，订阅方按 `event_type` 匹配后再 [`decode`](Self::decode) 为具体事件。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub metadata: Metadata,
    pub payload: Value,
    pub context: BusinessContext,
}

impl EventEnvelope {
    pub fn new<E: DomainEvent>(event: &E, context: BusinessContext) -> DomainResult<Self> {
        let metadata = Metadata::builder()
            .event_id(Uuid::new_v4().to_string())
            .event_type(E::EVENT_TYPE.to_string())
            .aggregate_id(event.aggregate_id())
            .aggregate_type(event.aggregate_type().to_string())
            .occurred_at(Utc::now())
            .build();

        Ok(Self {
            metadata,
            payload: serde_json::to_value(event)?,
            context,
        })
    }

    pub fn event_type(&self) -> &str {
        self.metadata.event_type()
    }

    /// 还原为具体事件类型；类型不符时报错
    pub fn decode<E: DomainEvent>(&self) -> DomainResult<E> {
        if self.event_type() != E::EVENT_TYPE {
            return Err(DomainError::Parse {
                reason: format!(
                    "event type mismatch: expected={}, found={}",
                    E::EVENT_TYPE,
                    self.event_type()
                ),
            });
        }
        Ok(serde_json::from_value(self.payload.clone())?)
    }
}
