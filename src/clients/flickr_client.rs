/// Flickr REST API 客户端
///
/// 封装所有与 Flickr API 相关的调用逻辑（只读）
use crate::clients::oauth;
use crate::config::Config;
use crate::error::{AppResult, FlickrError};
use crate::models::flickr::{
    ApiStatus, FlickrUser, LookupUserResponse, Photo, PhotosetInfoResponse, PhotosetListResponse,
    PhotosetPhotosResponse,
};
use crate::models::{load_credentials, FlickrCredentials, OAuthToken, Photoset};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

/// 每页条数（Flickr 允许的最大值）
const PER_PAGE: u32 = 500;

/// Flickr 客户端
pub struct FlickrClient {
    http: Client,
    base_url: String,
    api_key: String,
    api_secret: String,
    /// 存在时所有请求都做 OAuth 签名
    token: Option<OAuthToken>,
}

impl FlickrClient {
    /// 创建新的 Flickr 客户端
    pub fn new(config: &Config, credentials: &FlickrCredentials) -> Result<Self, FlickrError> {
        let http = Client::builder()
            .user_agent(concat!("flickrtoimmich/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| FlickrError::RequestFailed {
                method: "client".to_string(),
                source,
            })?;

        if credentials.token.is_some() {
            info!("已找到 OAuth token，请求将使用 OAuth 签名");
        }

        Ok(Self {
            http,
            base_url: config.flickr_api_url.clone(),
            api_key: credentials.api_key.clone(),
            api_secret: credentials.api_secret.clone(),
            token: credentials.token.clone(),
        })
    }

    /// 从 home 目录的凭据文件创建客户端
    ///
    /// 命令行入口统一走这里，凭据和客户端错误都收拢为 [`AppError`](crate::AppError)
    pub async fn from_home(config: &Config) -> AppResult<Self> {
        let credentials = load_credentials(config.home_dir.as_deref()).await?;
        Ok(Self::new(config, &credentials)?)
    }

    /// 调用 REST 方法并解析响应
    ///
    /// # 参数
    /// - `method`: Flickr 方法名，如 `flickr.photosets.getList`
    /// - `params`: 额外的查询参数
    async fn call<T: DeserializeOwned>(&self, method: &str, params: &[(&str, String)]) -> Result<T, FlickrError> {
        debug!("调用 Flickr API: {} {:?}", method, params);

        let mut query: Vec<(String, String)> = [
            ("method", method),
            ("api_key", self.api_key.as_str()),
            ("format", "json"),
            ("nojsoncallback", "1"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        query.extend(params.iter().map(|(k, v)| (k.to_string(), v.clone())));

        if let Some(token) = &self.token {
            oauth::sign_get(&mut query, &self.base_url, &self.api_key, &self.api_secret, token)?;
        }

        let res = self
            .http
            .get(&self.base_url)
            .query(&query)
            .send()
            .await
            .map_err(|source| FlickrError::RequestFailed {
                method: method.to_string(),
                source,
            })?;

        let status = res.status();
        if !status.is_success() {
            return Err(FlickrError::HttpStatus {
                method: method.to_string(),
                status: status.as_u16(),
            });
        }

        let body = res.text().await.map_err(|source| FlickrError::RequestFailed {
            method: method.to_string(),
            source,
        })?;

        let parse_err = |source| FlickrError::JsonParseFailed {
            method: method.to_string(),
            source,
        };

        let api_status: ApiStatus = serde_json::from_str(&body).map_err(parse_err)?;
        if api_status.stat != "ok" {
            return Err(FlickrError::BadResponse {
                method: method.to_string(),
                code: api_status.code,
                message: api_status.message.unwrap_or_default(),
            });
        }

        serde_json::from_str(&body).map_err(parse_err)
    }

    /// 通过主页 URL 查找用户
    pub async fn find_user_by_url(&self, url: &str) -> Result<FlickrUser, FlickrError> {
        let res: LookupUserResponse = self
            .call("flickr.urls.lookupUser", &[("url", url.to_string())])
            .await?;
        Ok(res.user)
    }

    /// 获取用户的全部相册（自动翻页）
    pub async fn photosets(&self, user_id: &str) -> Result<Vec<Photoset>, FlickrError> {
        let mut all = Vec::new();
        let mut page = 1u64;

        loop {
            let res: PhotosetListResponse = self
                .call(
                    "flickr.photosets.getList",
                    &[
                        ("user_id", user_id.to_string()),
                        ("page", page.to_string()),
                        ("per_page", PER_PAGE.to_string()),
                    ],
                )
                .await?;

            let fetched = res.photosets.photoset.len();
            all.extend(res.photosets.photoset);
            if fetched == 0 || res.photosets.page >= res.photosets.pages {
                break;
            }
            page = res.photosets.page + 1;
        }

        Ok(all)
    }

    /// 获取单个相册的信息
    pub async fn photoset_info(&self, photoset_id: &str) -> Result<Photoset, FlickrError> {
        let res: PhotosetInfoResponse = self
            .call(
                "flickr.photosets.getInfo",
                &[("photoset_id", photoset_id.to_string())],
            )
            .await?;
        Ok(res.photoset)
    }

    /// 获取相册中的全部文件（自动翻页，包含 media 字段）
    pub async fn photoset_photos(&self, photoset_id: &str) -> Result<Vec<Photo>, FlickrError> {
        let mut all = Vec::new();
        let mut page = 1u64;

        loop {
            let res: PhotosetPhotosResponse = self
                .call(
                    "flickr.photosets.getPhotos",
                    &[
                        ("photoset_id", photoset_id.to_string()),
                        ("extras", "media".to_string()),
                        ("page", page.to_string()),
                        ("per_page", PER_PAGE.to_string()),
                    ],
                )
                .await?;

            let fetched = res.photoset.photo.len();
            all.extend(res.photoset.photo);
            if fetched == 0 || res.photoset.page >= res.photoset.pages {
                break;
            }
            page = res.photoset.page + 1;
        }

        Ok(all)
    }
}
