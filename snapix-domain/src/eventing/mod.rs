//! 进程内事件子系统（eventing）
//!
//! - `EventBus`：统一发布/订阅接口；
//! - `EventHandler`：对某类/多类/全部事件进行消费处理；
//! - `EventEngine`：订阅总线，按处理器匹配分发并发执行，提供关闭句柄。
//!
//! 投递语义为“至多一次”：无订阅者或订阅方落后时事件被丢弃，处理失败不重试。
//!
pub mod bus;
pub mod bus_inmemory;
pub mod engine;
pub mod handler;

pub use bus::EventBus;
pub use bus_inmemory::InMemoryEventBus;
pub use engine::{EngineHandle, EventEngine, EventEngineConfig};
pub use handler::{EventHandler, HandledEventType};
