//! 错误类型
//!
//! 按关注点划分错误枚举，再统一收拢到 [`AppError`]。
//! 二进制入口和编排层使用 `anyhow::Result`，这里的类型负责描述"哪里出错"。

use std::path::PathBuf;
use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 扫描目录错误
    #[error("扫描错误: {0}")]
    Walk(#[from] WalkError),
    /// 上传进程错误
    #[error("上传错误: {0}")]
    Upload(#[from] UploadError),
    /// Flickr API 错误
    #[error("Flickr错误: {0}")]
    Flickr(#[from] FlickrError),
    /// 凭据文件错误
    #[error("凭据错误: {0}")]
    Credential(#[from] CredentialError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 扫描目录时的错误（全部视为致命错误）
#[derive(Debug, Error)]
pub enum WalkError {
    /// 根目录无法读取
    #[error("无法读取目录 {}: {source}", .path.display())]
    ReadDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 遍历子目录失败
    #[error("遍历目录失败 {}: {source}", .path.display())]
    TraverseFailed {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    /// 读取文件元数据失败
    #[error("无法读取文件信息 {}: {source}", .path.display())]
    MetadataFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// 上传进程错误
///
/// 注意：非零退出码不是错误，只是 `UploadOutcome::success == false`
#[derive(Debug, Error)]
pub enum UploadError {
    /// 无法启动上传程序
    #[error("无法启动上传程序 '{program}': {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// 等待进程退出失败
    #[error("等待上传进程失败: {0}")]
    WaitFailed(#[source] std::io::Error),
    /// 转发输出流失败
    #[error("转发 {stream} 输出失败: {source}")]
    StreamFailed {
        stream: &'static str,
        #[source]
        source: std::io::Error,
    },
    /// 转发任务异常退出
    #[error("输出转发任务异常退出: {0}")]
    DrainTaskFailed(#[from] tokio::task::JoinError),
}

/// Flickr REST API 错误
#[derive(Debug, Error)]
pub enum FlickrError {
    /// 网络请求失败
    #[error("API请求失败 ({method}): {source}")]
    RequestFailed {
        method: String,
        #[source]
        source: reqwest::Error,
    },
    /// HTTP 状态码异常
    #[error("API返回HTTP {status} ({method})")]
    HttpStatus { method: String, status: u16 },
    /// API 返回 stat=fail
    #[error("API返回错误响应 ({method}): code={code:?}, message={message}")]
    BadResponse {
        method: String,
        code: Option<i64>,
        message: String,
    },
    /// OAuth 签名失败
    #[error("OAuth签名失败: {0}")]
    SigningFailed(String),
    /// JSON 解析失败
    #[error("JSON解析失败 ({method}): {source}")]
    JsonParseFailed {
        method: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 凭据文件错误
#[derive(Debug, Error)]
pub enum CredentialError {
    /// 无法确定 home 目录
    #[error("无法确定用户主目录 (HOME 未设置)")]
    HomeNotFound,
    /// 读取文件失败
    #[error("读取凭据文件失败 ({}): {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// YAML 解析失败
    #[error("YAML解析失败 ({}): {source}", .path.display())]
    YamlParseFailed {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    /// token 文件格式不正确
    #[error("token 文件格式错误 ({}): 需要两行 (token / secret)", .path.display())]
    MalformedToken { path: PathBuf },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 批次大小非法
    #[error("批次大小必须 >= 1, 实际为 {0}")]
    InvalidBatchSize(usize),
    /// 扩展名列表为空
    #[error("至少需要一个文件扩展名")]
    NoExtensions,
    /// 日志级别无法识别
    #[error("无法识别的日志级别: '{0}'")]
    UnknownLogLevel(String),
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
