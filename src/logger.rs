//! 日志初始化
//!
//! 进程启动时调用一次 [`init`]，之后全程使用 `tracing` 宏。
//! 日志只写 stderr，stdout 留给进度输出和上传程序的转发输出。

use crate::error::ConfigError;
use std::io::Write;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// 日志配置
#[derive(Clone, Debug)]
pub struct LogConfig {
    /// 最低日志级别
    pub level: Level,
    /// 是否输出 target（模块路径）
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::DEBUG,
            with_target: true,
        }
    }
}

impl LogConfig {
    /// 从级别名创建配置
    ///
    /// 兼容 loguru 的级别名（SUCCESS / WARNING / CRITICAL）
    pub fn from_level_name(name: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            level: parse_level(name)?,
            ..Self::default()
        })
    }

    /// 级别名无法识别时，把原因写到 `report`（通常是 stderr）并使用默认级别
    pub fn from_level_name_or_default<W: Write>(name: &str, mut report: W) -> Self {
        Self::from_level_name(name).unwrap_or_else(|e| {
            let _ = writeln!(report, "{}，使用默认级别 {}", e, Self::default().level);
            Self::default()
        })
    }
}

/// 解析日志级别名
pub fn parse_level(name: &str) -> Result<Level, ConfigError> {
    match name.trim().to_uppercase().as_str() {
        "TRACE" => Ok(Level::TRACE),
        "DEBUG" => Ok(Level::DEBUG),
        "INFO" | "SUCCESS" => Ok(Level::INFO),
        "WARN" | "WARNING" => Ok(Level::WARN),
        "ERROR" | "CRITICAL" => Ok(Level::ERROR),
        _ => Err(ConfigError::UnknownLogLevel(name.to_string())),
    }
}

/// 初始化全局日志
///
/// 重复调用时静默忽略（测试里会多次初始化）
pub fn init(config: &LogConfig) {
    let filter = EnvFilter::new(format!(
        "{},reqwest=info,hyper=info",
        config.level.as_str().to_lowercase()
    ));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.with_target)
        .with_writer(std::io::stderr)
        .try_init();
}
