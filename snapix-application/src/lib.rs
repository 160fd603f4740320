//! Snapix 应用层（snapix-application）
//!
//! 以命令/查询（CQRS）组织用例：
//! - 消息与处理器契约：[`command`]、[`query`]、[`command_handler`]、[`query_handler`]
//! - 进程内总线：[`InMemoryCommandBus`]、[`InMemoryQueryBus`]，按消息类型唯一路由
//! - 用例：[`users`]、[`files`]、[`posts`]、[`auth`]，以及通知服务 [`notification`]
//! - 组合：[`registry::register_handlers`] 在启动时一次性注册全部处理器
//!
pub mod auth;
pub mod command;
pub mod command_bus;
pub mod command_handler;
pub mod context;
pub mod dto;
pub mod error;
pub mod files;
pub mod inmemory_command_bus;
pub mod inmemory_query_bus;
pub mod notification;
pub mod posts;
pub mod query;
pub mod query_bus;
pub mod query_handler;
pub mod registry;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support;

pub use inmemory_command_bus::InMemoryCommandBus;
pub use inmemory_query_bus::InMemoryQueryBus;
