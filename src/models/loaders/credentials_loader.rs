use crate::error::CredentialError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs;

/// API 密钥文件名（位于 home 目录）
pub const CONFIG_FILE_NAME: &str = ".flickr_download";
/// OAuth token 文件名（位于 home 目录，可选）
pub const TOKEN_FILE_NAME: &str = ".flickr_token";

/// Flickr API 凭据
#[derive(Debug, Clone, Deserialize)]
pub struct FlickrCredentials {
    pub api_key: String,
    pub api_secret: String,
    #[serde(skip)]
    pub token: Option<OAuthToken>,
}

/// 已保存的 OAuth token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthToken {
    pub token: String,
    pub secret: String,
}

/// 从 home 目录加载凭据
///
/// # 参数
/// - `home_dir`: 用户主目录
///
/// # 返回
/// 返回 API 密钥；token 文件存在时一并加载
pub async fn load_credentials(home_dir: Option<&Path>) -> Result<FlickrCredentials, CredentialError> {
    let home = home_dir.ok_or(CredentialError::HomeNotFound)?;

    let mut credentials = load_api_keys(&home.join(CONFIG_FILE_NAME)).await?;

    let token_path = home.join(TOKEN_FILE_NAME);
    if fs::try_exists(&token_path).await.unwrap_or(false) {
        credentials.token = Some(load_token(&token_path).await?);
        tracing::debug!("已加载 OAuth token: {}", token_path.display());
    }

    Ok(credentials)
}

/// 从 YAML 文件加载 api_key / api_secret
pub async fn load_api_keys(path: &Path) -> Result<FlickrCredentials, CredentialError> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|source| CredentialError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;

    serde_yaml::from_str(&content).map_err(|source| CredentialError::YamlParseFailed {
        path: path.to_path_buf(),
        source,
    })
}

/// 加载 token 文件（第一行 token，第二行 secret）
pub async fn load_token(path: &Path) -> Result<OAuthToken, CredentialError> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|source| CredentialError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;

    let mut lines = content.lines().map(str::trim).filter(|l| !l.is_empty());
    match (lines.next(), lines.next()) {
        (Some(token), Some(secret)) => Ok(OAuthToken {
            token: token.to_string(),
            secret: secret.to_string(),
        }),
        _ => Err(CredentialError::MalformedToken {
            path: PathBuf::from(path),
        }),
    }
}
