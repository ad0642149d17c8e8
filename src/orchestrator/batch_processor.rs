//! 批量上传处理器 - 编排层
//!
//! ## 职责
//!
//! 1. **扫描**：把 `DATA_DIR` 下的子目录扫描成相册列表
//! 2. **统计**：先算出相册、文件、批次总数，再开始输出
//! 3. **分批上传**：相册和批次严格串行，同一时间最多一个上传进程
//! 4. **演练**：`--dry-run` 时只输出计划（含大小和修改时间），不调用上传程序
//!
//! 单个批次上传失败只记录错误，继续下一批；扫描失败或进程无法启动则终止运行。

use crate::config::{Config, UploadOptions};
use crate::models::UploadPlan;
use crate::services::{scan_albums, BatchUploader, FileStat, ProgressReporter};
use anyhow::{Context, Result};
use std::io::{self, Write};
use tracing::{error, info, warn};

/// 运行统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub albums: usize,
    pub files: usize,
    pub batches: usize,
    /// 上传失败的批次数（演练模式恒为 0）
    pub failed_batches: usize,
    /// 演练模式下的文件总大小
    pub total_size: u64,
}

/// 上传应用
pub struct App<U: BatchUploader> {
    config: Config,
    options: UploadOptions,
    uploader: U,
}

impl<U: BatchUploader> App<U> {
    pub fn new(config: Config, options: UploadOptions, uploader: U) -> Self {
        Self {
            config,
            options,
            uploader,
        }
    }

    /// 运行，进度输出到 stdout
    pub async fn run(&self) -> Result<RunSummary> {
        self.run_with_output(io::stdout()).await
    }

    /// 运行，进度输出到指定 writer
    pub async fn run_with_output<W: Write>(&self, out: W) -> Result<RunSummary> {
        let dry_run = self.options.dry_run;
        let mut reporter = ProgressReporter::new(out, dry_run);
        reporter.start().context("无法写入进度输出")?;

        info!("📁 正在扫描相册目录: {}", self.config.data_dir.display());
        let albums = scan_albums(&self.config.data_dir, &self.options.extensions)
            .with_context(|| format!("扫描相册目录失败: {}", self.config.data_dir.display()))?;

        let plan = UploadPlan::new(albums, self.options.batch_size);
        let mut summary = RunSummary {
            albums: plan.total_albums(),
            files: plan.total_files(),
            batches: plan.total_batches(),
            ..Default::default()
        };
        info!(
            "✓ 找到 {} 个相册, {} 个文件, 每批 {} 个, 共 {} 批",
            summary.albums, summary.files, plan.batch_size, summary.batches
        );

        let mut file_nr = 0;
        let mut global_batch_nr = 0;

        for (album_idx, album) in plan.albums.iter().enumerate() {
            let album_batches = album.batch_count(plan.batch_size);

            let stats = if dry_run {
                album
                    .files
                    .iter()
                    .map(|f| FileStat::read(f))
                    .collect::<Result<Vec<_>, _>>()
                    .with_context(|| format!("读取相册 '{}' 的文件信息失败", album.name))?
            } else {
                Vec::new()
            };
            let album_size = dry_run.then(|| stats.iter().map(|s| s.size).sum::<u64>());
            summary.total_size += album_size.unwrap_or(0);

            reporter.album(album_idx + 1, summary.albums, album, album_size, album_batches)?;

            for batch in album.batches(plan.batch_size) {
                global_batch_nr += 1;
                reporter.batch(
                    batch.number,
                    album_batches,
                    global_batch_nr,
                    summary.batches,
                    batch.files.len(),
                )?;

                let offset = (batch.number - 1) * plan.batch_size;
                for (idx_in_batch, path) in batch.files.iter().enumerate() {
                    file_nr += 1;
                    reporter.file(
                        file_nr,
                        summary.files,
                        idx_in_batch + 1,
                        batch.files.len(),
                        path,
                        stats.get(offset + idx_in_batch),
                    )?;
                }

                if dry_run {
                    continue;
                }

                let outcome = self
                    .uploader
                    .upload_batch(batch.files, &album.name)
                    .await
                    .with_context(|| format!("相册 '{}' 批次 {} 上传失败", album.name, batch.number))?;

                if !outcome.success {
                    summary.failed_batches += 1;
                    error!(
                        "❌ 相册 '{}' 批次 {}/{} 上传失败 (退出码: {:?})，继续下一批",
                        album.name, batch.number, album_batches, outcome.exit_code
                    );
                }
            }
        }

        if dry_run {
            reporter.totals(summary.albums, summary.files, summary.total_size)?;
        }
        reporter.done()?;

        log_summary(&summary, dry_run);
        Ok(summary)
    }
}

fn log_summary(summary: &RunSummary, dry_run: bool) {
    info!("{}", "=".repeat(60));
    if dry_run {
        info!("📊 演练完成: {} 个相册, {} 个文件, {} 批", summary.albums, summary.files, summary.batches);
    } else {
        info!(
            "📊 上传完成: 成功 {}/{} 批",
            summary.batches - summary.failed_batches,
            summary.batches
        );
    }
    if summary.failed_batches > 0 {
        warn!("⚠️ 有 {} 个批次上传失败，请检查上面的错误输出", summary.failed_batches);
    }
    info!("{}", "=".repeat(60));
}
