/// 日志工具模块
///
/// 启动横幅和运行配置表的输出
use tracing::info;

const PROJECT_URL: &str = "https://github.com/vroomfondel/flickrtoimmich";
const DOCKER_HUB_URL: &str = "https://hub.docker.com/r/xomoxcc/flickr-download";

/// 启动时展示的环境变量（变量名, 显示名）
pub const CONFIG_ENV_VARS: [(&str, &str); 9] = [
    ("DATA_DIR", "Data directory"),
    ("IMMICH_INSTANCE_URL", "Immich URL"),
    ("IMMICH_API_KEY", "Immich API key"),
    ("FLICKR_HOME", "Flickr home dir"),
    ("LOGURU_LEVEL", "Log level"),
    ("USE_DSOCKET", "Domain socket mode"),
    ("USE_DBUS", "D-Bus mode"),
    ("BACKOFF_EXIT_ON_429", "Exit on rate limit"),
    ("BUILDTIME", "Build time"),
];

/// 敏感值打码，只保留最后 4 个字符
///
/// # 参数
/// - `key`: 变量名，包含 KEY / SECRET / TOKEN / PASSWORD 时视为敏感
/// - `value`: 原始值
pub fn mask_secret(key: &str, value: &str) -> String {
    let sensitive = ["KEY", "SECRET", "TOKEN", "PASSWORD"]
        .iter()
        .any(|marker| key.contains(marker));
    let len = value.chars().count();

    if sensitive && len > 4 {
        let tail: String = value.chars().skip(len - 4).collect();
        format!("{}{}", "*".repeat(len - 4), tail)
    } else {
        value.to_string()
    }
}

/// 收集已设置的配置项（显示名, 打码后的值）
///
/// # 参数
/// - `lookup`: 环境变量查询函数，便于测试替换
pub fn config_rows<F>(lookup: F) -> Vec<(&'static str, String)>
where
    F: Fn(&str) -> Option<String>,
{
    CONFIG_ENV_VARS
        .iter()
        .filter_map(|(var, label)| lookup(var).map(|value| (*label, mask_secret(var, &value))))
        .collect()
}

/// 记录程序启动信息
///
/// # 参数
/// - `tool`: 当前运行的工具名
pub fn log_startup(tool: &str) {
    for row in banner_rows(tool) {
        info!("{}", row);
    }
}

/// 启动横幅的各行
pub fn banner_rows(tool: &str) -> Vec<String> {
    let rule = "=".repeat(60);
    vec![
        rule.clone(),
        format!("🚀 flickrtoimmich 启动 - {}", tool),
        format!("📦 version: {}", env!("CARGO_PKG_VERSION")),
        format!("🔗 github: {}", PROJECT_URL),
        format!("🐳 docker hub: {}", DOCKER_HUB_URL),
        rule,
    ]
}

/// 记录运行配置，没有任何已设置的变量时不输出
pub fn log_config() {
    let rows = config_rows(|var| std::env::var(var).ok());
    if rows.is_empty() {
        return;
    }

    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    info!("⚙️ 运行配置");
    info!("{}", "─".repeat(60));
    for (label, value) in rows {
        info!("{:<width$} │ {}", label, value, width = width);
    }
    info!("{}", "─".repeat(60));
}
