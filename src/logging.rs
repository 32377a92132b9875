//! 日志初始化

use tracing_subscriber::EnvFilter;

/// 默认日志级别（未设置 `RUST_LOG` 时使用）
pub const DEFAULT_FILTER: &str = "info";

/// 安装全局 fmt 订阅者，重复调用无副作用
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
