//! 值对象（Value Object）
//!
//! 无标识、以值相等为准的对象，用于封装不可变的概念性值与校验逻辑。
//! 具体值对象位于各自的聚合模块中（如 `user::Username`、`post::PostContent`）。
//!
use crate::error::{DomainError, DomainResult};

/// 值对象抽象
pub trait ValueObject {
    /// 业务校验失败时的错误类型
    type Error;

    /// 创建值对象时进行验证
    fn validate(&self) -> Result<(), Self::Error>;
}

/// 校验字符数（按 Unicode 标量计数）是否落在 `[min, max]` 区间
pub fn ensure_char_len(field: &str, value: &str, min: usize, max: usize) -> DomainResult<()> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(DomainError::invalid_value(format!(
            "{field} must be between {min} and {max} characters, got {len}"
        )));
    }
    Ok(())
}

/// 构造并立即校验值对象
pub fn validated<V>(value: V) -> DomainResult<V>
where
    V: ValueObject<Error = DomainError>,
{
    value.validate()?;
    Ok(value)
}
