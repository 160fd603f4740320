use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;

/// 领域事件载荷需要满足的通用能力边界
pub trait DomainEvent:
    Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// 事件类型（形如 `post.create`），用于订阅匹配
    const EVENT_TYPE: &'static str;

    /// 事件所属实体类型
    fn aggregate_type(&self) -> &'static str;

    /// 事件所属实体标识
    fn aggregate_id(&self) -> String;
}
