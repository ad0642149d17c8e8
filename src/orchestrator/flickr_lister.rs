//! Flickr 列表处理器 - 编排层
//!
//! 只查询 Flickr API，列出相册和文件，不下载任何内容。

use crate::clients::FlickrClient;
use crate::models::Photoset;
use anyhow::{Context, Result};
use std::io::Write;
use tracing::info;

/// 用户相册统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UserListing {
    pub albums: usize,
    pub photos: u64,
    pub videos: u64,
}

/// 列出用户的全部相册
///
/// # 参数
/// - `client`: Flickr 客户端
/// - `user_url`: 用户主页，如 `https://www.flickr.com/photos/username`
/// - `verbose`: 是否逐个列出相册中的文件
pub async fn dry_run_user(client: &FlickrClient, user_url: &str, verbose: bool) -> Result<UserListing> {
    let user = client
        .find_user_by_url(user_url)
        .await
        .with_context(|| format!("无法找到用户: {}", user_url))?;
    info!("[DRY-RUN] User: {}", user.username.content);

    let photosets = client.photosets(&user.id).await.context("获取相册列表失败")?;

    let mut listing = UserListing::default();
    for ps in &photosets {
        listing.albums += 1;
        listing.photos += ps.photos;
        listing.videos += ps.videos;
        info!(
            "[DRY-RUN] Album {}: '{}' - {} photo(s), {} video(s)",
            listing.albums, ps.title.content, ps.photos, ps.videos
        );
        if verbose {
            list_album_photos(client, ps).await?;
        }
    }

    info!(
        "[DRY-RUN] Total: {} album(s), {} photo(s), {} video(s)",
        listing.albums, listing.photos, listing.videos
    );
    Ok(listing)
}

/// 列出单个相册中的文件
///
/// # 返回
/// 返回文件数量
pub async fn dry_run_album(client: &FlickrClient, album_id: &str) -> Result<usize> {
    let ps = client
        .photoset_info(album_id)
        .await
        .with_context(|| format!("获取相册信息失败: {}", album_id))?;
    info!("[DRY-RUN] Album: '{}' (ID: {})", ps.title.content, album_id);

    let count = list_album_photos(client, &ps).await?;
    info!("[DRY-RUN] Total: {} file(s) in album", count);
    Ok(count)
}

async fn list_album_photos(client: &FlickrClient, ps: &Photoset) -> Result<usize> {
    let photos = client
        .photoset_photos(&ps.id)
        .await
        .with_context(|| format!("获取相册 '{}' 的文件失败", ps.title.content))?;

    for (idx, photo) in photos.iter().enumerate() {
        info!("[DRY-RUN]   [{}] {} ({})", idx + 1, photo.title, photo.media);
    }
    Ok(photos.len())
}

/// 每个相册输出一行：`<id> - <title> (<n> photos, <m> videos)`
///
/// # 返回
/// 返回相册数量
pub async fn list_albums<W: Write>(client: &FlickrClient, user_url: &str, mut out: W) -> Result<usize> {
    let user = client
        .find_user_by_url(user_url)
        .await
        .with_context(|| format!("无法找到用户: {}", user_url))?;
    let photosets = client.photosets(&user.id).await.context("获取相册列表失败")?;

    for ps in &photosets {
        writeln!(
            out,
            "{} - {} ({} photos, {} videos)",
            ps.id, ps.title.content, ps.photos, ps.videos
        )?;
    }
    out.flush()?;
    Ok(photosets.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::FlickrCredentials;
    use serde_json::json;
    use wiremock::matchers::query_param;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mock_flickr() -> (MockServer, FlickrClient) {
        let server = MockServer::start().await;

        Mock::given(query_param("method", "flickr.urls.lookupUser"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user": {"id": "42@N00", "username": {"_content": "tester"}},
                "stat": "ok"
            })))
            .mount(&server)
            .await;
        Mock::given(query_param("method", "flickr.photosets.getList"))
            .and(query_param("user_id", "42@N00"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "photosets": {"page": 1, "pages": 1, "photoset": [
                    {"id": "100", "title": {"_content": "Beach"}, "photos": 2, "videos": 1},
                    {"id": "200", "title": {"_content": "City"}, "photos": "5", "videos": "0"}
                ]},
                "stat": "ok"
            })))
            .mount(&server)
            .await;
        Mock::given(query_param("method", "flickr.photosets.getInfo"))
            .and(query_param("photoset_id", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "photoset": {"id": "100", "title": {"_content": "Beach"}, "photos": 2},
                "stat": "ok"
            })))
            .mount(&server)
            .await;
        Mock::given(query_param("method", "flickr.photosets.getPhotos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "photoset": {"id": "100", "page": 1, "pages": 1, "photo": [
                    {"id": "1", "title": "sunset", "media": "photo"},
                    {"id": "2", "title": "waves", "media": "video"},
                    {"id": "3", "title": "sand"}
                ]},
                "stat": "ok"
            })))
            .mount(&server)
            .await;

        let config = Config {
            flickr_api_url: server.uri(),
            ..Config::default()
        };
        let credentials = FlickrCredentials {
            api_key: "k".to_string(),
            api_secret: "s".to_string(),
            token: None,
        };
        let client = FlickrClient::new(&config, &credentials).unwrap();
        (server, client)
    }

    #[tokio::test]
    async fn test_dry_run_user_totals() {
        let (_server, client) = mock_flickr().await;

        let listing = dry_run_user(&client, "https://www.flickr.com/photos/tester", true)
            .await
            .unwrap();

        assert_eq!(
            listing,
            UserListing {
                albums: 2,
                photos: 7,
                videos: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_dry_run_album_counts_files() {
        let (_server, client) = mock_flickr().await;
        assert_eq!(dry_run_album(&client, "100").await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_list_albums_output() {
        let (_server, client) = mock_flickr().await;

        let mut out = Vec::new();
        let count = list_albums(&client, "https://www.flickr.com/photos/tester", &mut out)
            .await
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "100 - Beach (2 photos, 1 videos)\n200 - City (5 photos, 0 videos)\n"
        );
    }
}
