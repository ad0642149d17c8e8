use crate::error::ConfigError;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// 默认批次大小
pub const DEFAULT_BATCH_SIZE: usize = 20;

/// 默认上传的文件扩展名
pub const DEFAULT_EXTENSIONS: [&str; 4] = [".jpg", ".jpeg", ".png", ".mp4"];

/// 程序配置（来自环境变量）
#[derive(Clone, Debug)]
pub struct Config {
    /// 相册根目录（每个子目录对应一个相册）
    pub data_dir: PathBuf,
    /// immich 上传程序
    pub immich_bin: String,
    /// Flickr REST 接口地址
    pub flickr_api_url: String,
    /// 用户主目录，凭据文件存放位置
    pub home_dir: Option<PathBuf>,
    /// 日志级别（兼容 loguru 的级别名）
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            immich_bin: "immich".to_string(),
            flickr_api_url: "https://api.flickr.com/services/rest/".to_string(),
            home_dir: dirs::home_dir(),
            log_level: "DEBUG".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            data_dir: std::env::var("DATA_DIR")
                .ok()
                .filter(|d| !d.is_empty())
                .map(PathBuf::from)
                .unwrap_or(default.data_dir),
            immich_bin: std::env::var("IMMICH_BIN").unwrap_or(default.immich_bin),
            flickr_api_url: std::env::var("FLICKR_API_URL").unwrap_or(default.flickr_api_url),
            home_dir: std::env::var("HOME").ok().filter(|h| !h.is_empty()).map(PathBuf::from).or(default.home_dir),
            log_level: std::env::var("LOGURU_LEVEL").unwrap_or(default.log_level),
        }
    }
}

/// 上传运行参数（来自命令行）
#[derive(Clone, Debug)]
pub struct UploadOptions {
    /// 每批文件数量
    pub batch_size: usize,
    /// 小写、带前导点的扩展名集合
    pub extensions: BTreeSet<String>,
    /// 只列出计划，不上传
    pub dry_run: bool,
}

impl UploadOptions {
    /// 校验并规范化命令行参数
    ///
    /// # 参数
    /// - `batch_size`: 每批文件数量，必须 >= 1
    /// - `extensions`: 扩展名列表，`JPG` / `.jpg` 都会规范化为 `.jpg`
    /// - `dry_run`: 是否只演练
    pub fn new<S: AsRef<str>>(batch_size: usize, extensions: &[S], dry_run: bool) -> Result<Self, ConfigError> {
        if batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize(batch_size));
        }

        let extensions: BTreeSet<String> = extensions
            .iter()
            .map(|e| normalize_extension(e.as_ref()))
            .filter(|e| e.len() > 1)
            .collect();

        if extensions.is_empty() {
            return Err(ConfigError::NoExtensions);
        }

        Ok(Self {
            batch_size,
            extensions,
            dry_run,
        })
    }
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            dry_run: false,
        }
    }
}

fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{}", ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extensions_are_normalized() {
        let opts = UploadOptions::new(5, &["JPG", ".Png", " .mp4 "], false).unwrap();
        let exts: Vec<_> = opts.extensions.iter().map(String::as_str).collect();
        assert_eq!(exts, vec![".jpg", ".mp4", ".png"]);
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let err = UploadOptions::new(0, &[".jpg"], false).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBatchSize(0)));
    }

    #[test]
    fn test_empty_extensions_rejected() {
        let err = UploadOptions::new::<&str>(1, &[], false).unwrap_err();
        assert!(matches!(err, ConfigError::NoExtensions));
        let err = UploadOptions::new(1, &["."], false).unwrap_err();
        assert!(matches!(err, ConfigError::NoExtensions));
    }

    #[test]
    fn test_defaults() {
        let opts = UploadOptions::default();
        assert_eq!(opts.batch_size, 20);
        assert_eq!(opts.extensions.len(), 4);
        assert!(opts.extensions.contains(".jpeg"));
        assert!(!opts.dry_run);
    }
}
