//! 实体（Entity）基础抽象
//!
//! 实体以标识区分，标识在创建时由仓储或领域工厂分配，之后不可变。
//!
use std::{fmt::Display, str::FromStr};

/// 具备唯一标识的实体抽象
pub trait Entity: Send + Sync {
    /// 实体标识类型，要求可解析、可显示与可复制
    type Id: FromStr + Copy + Display + Send + Sync;

    /// 实体类型名（用于日志与事件元数据）
    const TYPE: &'static str;

    /// 获取实体标识
    fn id(&self) -> Self::Id;
}
