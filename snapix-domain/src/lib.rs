//! Snapix 领域层（snapix-domain）
//!
//! 提供业务核心模型与对外协作方的接口约定：
//! - 实体与标识：用户资料（`user`）、帖子（`post`）、文件记录（`file`）
//! - 值对象（`value_object`）：带校验的不可变概念值
//! - 领域事件（`domain_event`）与进程内事件系统（`eventing`）
//! - 仓储（`persist`）、对象存储（`storage`）、通知（`notification`）端口
//!
//! 本 crate 不依赖任何具体存储或传输实现，基础设施在 `snapix-infra` 中提供。
//!
pub mod domain_event;
pub mod entity;
pub mod error;
pub mod eventing;
pub mod file;
pub mod notification;
pub mod persist;
pub mod post;
pub mod storage;
pub mod user;
pub mod value_object;
