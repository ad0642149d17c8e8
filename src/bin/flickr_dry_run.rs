//! flickr-dry-run：列出 Flickr 用户或相册的内容，不下载

use anyhow::Result;
use clap::{Parser, Subcommand};
use flickrtoimmich::logger::{self, LogConfig};
use flickrtoimmich::orchestrator::{dry_run_album, dry_run_user};
use flickrtoimmich::{utils, Config, FlickrClient};

/// Dry-run mode for Flickr downloads
#[derive(Debug, Parser)]
#[command(name = "flickr-dry-run", version)]
struct Args {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// List all albums for a user
    User {
        /// Flickr user URL
        url: String,
        /// list individual photos per album
        #[arg(short, long)]
        verbose: bool,
    },
    /// List photos in an album
    Album {
        /// Flickr album/photoset ID
        album_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();
    logger::init(&LogConfig::from_level_name_or_default(&config.log_level, std::io::stderr()));
    utils::log_startup("flickr-dry-run");
    utils::log_config();

    let args = Args::parse();

    let client = FlickrClient::from_home(&config).await?;

    match args.mode {
        Mode::User { url, verbose } => {
            dry_run_user(&client, &url, verbose).await?;
        }
        Mode::Album { album_id } => {
            dry_run_album(&client, &album_id).await?;
        }
    }

    Ok(())
}
