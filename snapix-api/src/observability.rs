//! 日志/追踪初始化
//!
//! 过滤器取自 `RUST_LOG`，默认 `info`；开发环境输出易读格式，其余环境输出 JSON。
//! 重复调用时后续调用不生效。
//!
use tracing_subscriber::EnvFilter;

pub fn init(is_dev: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let _ = if is_dev {
        builder.pretty().try_init()
    } else {
        builder
            .json()
            .with_timer(tracing_subscriber::fmt::time::SystemTime)
            .with_target(false)
            .try_init()
    };
}
