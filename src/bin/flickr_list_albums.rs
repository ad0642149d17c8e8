//! flickr-list-albums：每个相册输出一行 id、标题和照片/视频数量

use anyhow::Result;
use flickrtoimmich::logger::{self, LogConfig};
use flickrtoimmich::orchestrator::list_albums;
use flickrtoimmich::{Config, FlickrClient};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let Some(user_url) = std::env::args().nth(1) else {
        eprintln!("Usage: flickr-list-albums <flickr-user-url>");
        return Ok(ExitCode::FAILURE);
    };

    let config = Config::from_env();
    logger::init(&LogConfig::from_level_name_or_default(&config.log_level, std::io::stderr()));

    let client = FlickrClient::from_home(&config).await?;
    list_albums(&client, &user_url, std::io::stdout()).await?;

    Ok(ExitCode::SUCCESS)
}
