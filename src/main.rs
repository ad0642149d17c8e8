//! immich-uploader：把 `DATA_DIR` 下的相册分批上传到 Immich

use anyhow::Result;
use clap::Parser;
use flickrtoimmich::config::{DEFAULT_BATCH_SIZE, DEFAULT_EXTENSIONS};
use flickrtoimmich::logger::{self, LogConfig};
use flickrtoimmich::{utils, App, Config, ImmichUploader, UploadOptions};
use tracing::warn;

/// Upload photos/videos to Immich in batches
#[derive(Debug, Parser)]
#[command(name = "immich-uploader", version)]
struct Args {
    /// number of files per upload batch
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// file extensions to include
    #[arg(long, num_args = 1.., default_values_t = DEFAULT_EXTENSIONS.map(String::from))]
    extensions: Vec<String>,

    /// list files that would be uploaded without uploading
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logger::init(&LogConfig::from_level_name_or_default(&config.log_level, std::io::stderr()));
    utils::log_startup("immich-uploader");
    utils::log_config();

    let args = Args::parse();
    let options = UploadOptions::new(args.batch_size, &args.extensions, args.dry_run)?;

    let uploader = ImmichUploader::new(&config.immich_bin);
    let summary = App::new(config, options, uploader).run().await?;

    if summary.failed_batches > 0 {
        warn!("{}/{} 个批次失败，退出码仍为 0", summary.failed_batches, summary.batches);
    }

    Ok(())
}
