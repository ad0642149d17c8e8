//! Flickr REST 响应结构
//!
//! Flickr 的计数字段有时是数字、有时是字符串，统一用 [`de_count`] 解析。

use serde::de::{self, Deserializer};
use serde::Deserialize;

/// `{"_content": "..."}` 包装
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Content {
    #[serde(rename = "_content", default)]
    pub content: String,
}

/// 失败响应 `{"stat": "fail", "code": 1, "message": "..."}`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiStatus {
    pub stat: String,
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// flickr.urls.lookupUser
#[derive(Debug, Clone, Deserialize)]
pub struct LookupUserResponse {
    pub user: FlickrUser,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct FlickrUser {
    pub id: String,
    #[serde(default)]
    pub username: Content,
}

/// flickr.photosets.getList
#[derive(Debug, Clone, Deserialize)]
pub struct PhotosetListResponse {
    pub photosets: PhotosetPage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotosetPage {
    #[serde(default = "first_page", deserialize_with = "de_count")]
    pub page: u64,
    #[serde(default = "first_page", deserialize_with = "de_count")]
    pub pages: u64,
    #[serde(default)]
    pub photoset: Vec<Photoset>,
}

/// 相册（photoset）摘要
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Photoset {
    pub id: String,
    #[serde(default)]
    pub title: Content,
    #[serde(default, deserialize_with = "de_count")]
    pub photos: u64,
    #[serde(default, deserialize_with = "de_count")]
    pub videos: u64,
}

/// flickr.photosets.getInfo
#[derive(Debug, Clone, Deserialize)]
pub struct PhotosetInfoResponse {
    pub photoset: Photoset,
}

/// flickr.photosets.getPhotos
#[derive(Debug, Clone, Deserialize)]
pub struct PhotosetPhotosResponse {
    pub photoset: PhotoPage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoPage {
    #[serde(default = "first_page", deserialize_with = "de_count")]
    pub page: u64,
    #[serde(default = "first_page", deserialize_with = "de_count")]
    pub pages: u64,
    #[serde(default)]
    pub photo: Vec<Photo>,
}

/// 相册中的单个文件
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Photo {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_media")]
    pub media: String,
}

fn first_page() -> u64 {
    1
}

fn default_media() -> String {
    "photo".to_string()
}

/// 同时接受数字和数字字符串
pub fn de_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Num(u64),
        Text(String),
    }

    match Count::deserialize(deserializer)? {
        Count::Num(n) => Ok(n),
        Count::Text(s) => s.trim().parse().map_err(de::Error::custom),
    }
}
