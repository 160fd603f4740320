//! 仓储端口（persist）
//!
//! 每个聚合一个仓储，只暴露用例需要的最小读写集合：
//! - `save` 为按主键 upsert，返回持久化后的实体；
//! - `find_*` 以 `Option` 表达“不存在”，与空值严格区分；
//! - `delete_one` 返回是否删除了记录。
//!
//! 具体实现（内存、Postgres）由 `snapix-infra` 提供并在组合根注入。
//!
mod file_repository;
mod post_repository;
mod user_repository;

pub use file_repository::{FileFilter, FileRepository};
pub use post_repository::PostRepository;
pub use user_repository::UserRepository;
