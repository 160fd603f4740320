/// 应用层命令（Command）
///
/// 表达“意图”的写操作请求，会修改领域状态。
/// - `Output` 为执行成功后返回给调用方的视图；无返回时使用 `()`；
/// - 命名保持“动宾结构”，如 `FillOutProfile`、`DeleteAvatarFile`。
///
/// `NAME` 为命令的稳定名称，用于日志、追踪与注册冲突提示。
pub trait Command: Send + Sync + 'static {
    const NAME: &'static str;

    type Output: Send + 'static;
}
