use serde::Serialize;

/// 数据传输对象（DTO）
///
/// 应用层的输出载体，与领域模型解耦，直接作为 HTTP 响应体序列化。
pub trait Dto: Serialize + Send + Sync + 'static {}

impl<T: Dto> Dto for Option<T> {}

impl Dto for () {}
