//! Snapix 领域建模宏
//!
//! - `#[entity_id]`：为单字段 tuple struct 生成标识类型所需的派生与转换
//! - `#[value_object]`：为值对象合并统一的派生集合
//!
use proc_macro::TokenStream;

mod derive_utils;
mod entity_id;
mod value_object;

/// 实体 ID 宏
///
/// 仅支持单字段 `tuple struct`（如 `struct UserId(i64);`、`struct PostId(Uuid);`），生成：
/// - 派生：Clone, Copy, Debug（可关闭）, Serialize, Deserialize（透明）, PartialEq, Eq, Hash
/// - `new(value)` / `value()`、`Display`、`FromStr`、双向 `From`
///
/// 参数：`#[entity_id(debug = false)]`
#[proc_macro_attribute]
pub fn entity_id(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity_id::expand(attr, item)
}

/// 值对象宏
///
/// 支持结构体（具名或 tuple）与枚举，合并派生：
/// Debug（可关闭）, Clone, Serialize, Deserialize, PartialEq, Eq
///
/// 参数：`#[value_object(debug = false)]`
#[proc_macro_attribute]
pub fn value_object(attr: TokenStream, item: TokenStream) -> TokenStream {
    value_object::expand(attr, item)
}
