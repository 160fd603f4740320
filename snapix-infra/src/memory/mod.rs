//! 内存实现
//!
//! 数据只存活于进程内；并发修改按 `DashMap` 分片锁各自生效，不做额外协调。
//!
mod object_storage;
mod repositories;

pub use object_storage::InMemoryObjectStorage;
pub use repositories::{InMemoryFileRepository, InMemoryPostRepository, InMemoryUserRepository};
