//! 进度输出服务 - 业务能力层
//!
//! 负责把上传计划按"相册 → 批次 → 文件"的顺序打印出来。
//! 只写传入的 writer，不做任何上传。

use crate::error::WalkError;
use crate::models::Album;
use chrono::{DateTime, Utc};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

const DRY_RUN_PREFIX: &str = "[DRY-RUN] ";

/// 文件大小和修改时间（仅演练模式使用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub size: u64,
    pub modified: DateTime<Utc>,
}

impl FileStat {
    /// 读取文件元数据
    pub fn read(path: &Path) -> Result<Self, WalkError> {
        let metadata_err = |source: io::Error| WalkError::MetadataFailed {
            path: path.to_path_buf(),
            source,
        };
        let meta = fs::metadata(path).map_err(metadata_err)?;
        let modified = meta.modified().map_err(metadata_err)?;

        Ok(Self {
            size: meta.len(),
            modified: DateTime::<Utc>::from(modified),
        })
    }
}

/// 人类可读的文件大小（1024 进制，字节以外保留一位小数）
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut size = bytes as f64 / 1024.0;
    for unit in ["KB", "MB", "GB"] {
        if size < 1024.0 {
            return format!("{:.1} {}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.1} TB", size)
}

/// UTC 时间，格式 `YYYY-MM-DD HH:MM:SS`
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// 进度输出
///
/// 所有计数从 1 开始；演练模式下每行带 `[DRY-RUN] ` 前缀
pub struct ProgressReporter<W: Write> {
    out: W,
    dry_run: bool,
}

impl<W: Write> ProgressReporter<W> {
    pub fn new(out: W, dry_run: bool) -> Self {
        Self { out, dry_run }
    }

    fn prefix(&self) -> &'static str {
        if self.dry_run {
            DRY_RUN_PREFIX
        } else {
            ""
        }
    }

    /// 每行都立即 flush，保证和上传程序的输出按顺序出现
    fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)?;
        self.out.flush()
    }

    pub fn start(&mut self) -> io::Result<()> {
        self.line("START")
    }

    /// 相册标题行
    ///
    /// # 参数
    /// - `album_nr` / `total_albums`: 相册序号和总数
    /// - `album_size`: 演练模式下的相册总大小
    /// - `batches`: 本相册批次数
    pub fn album(
        &mut self,
        album_nr: usize,
        total_albums: usize,
        album: &Album,
        album_size: Option<u64>,
        batches: usize,
    ) -> io::Result<()> {
        let size = album_size
            .map(|size| format!("{}, ", format_size(size)))
            .unwrap_or_default();
        let text = format!(
            "{}Album {}/{} '{}': {} file(s), {}{} batch(es)",
            self.prefix(),
            album_nr,
            total_albums,
            album.name,
            album.files.len(),
            size,
            batches
        );
        self.line(&text)
    }

    /// 批次标题行：相册内序号和全局序号
    pub fn batch(
        &mut self,
        batch_nr: usize,
        album_batches: usize,
        global_batch_nr: usize,
        total_batches: usize,
        files_in_batch: usize,
    ) -> io::Result<()> {
        let text = format!(
            "{}  Batch {}/{} [{}/{}] ({} file(s))",
            self.prefix(),
            batch_nr,
            album_batches,
            global_batch_nr,
            total_batches,
            files_in_batch
        );
        self.line(&text)
    }

    /// 文件行
    pub fn file(
        &mut self,
        file_nr: usize,
        total_files: usize,
        idx_in_batch: usize,
        batch_len: usize,
        path: &Path,
        stat: Option<&FileStat>,
    ) -> io::Result<()> {
        let mut text = format!(
            "{}    [{}/{}] batch:{}/{}  {}",
            self.prefix(),
            file_nr,
            total_files,
            idx_in_batch,
            batch_len,
            path.display()
        );
        if let Some(stat) = stat {
            text.push_str(&format!(
                "  ({}, {})",
                format_size(stat.size),
                format_timestamp(&stat.modified)
            ));
        }
        self.line(&text)
    }

    /// 演练模式的汇总行
    pub fn totals(&mut self, albums: usize, files: usize, total_size: u64) -> io::Result<()> {
        let text = format!(
            "{}Total: {} album(s), {} file(s), {}",
            self.prefix(),
            albums,
            files,
            format_size(total_size)
        );
        self.line("")?;
        self.line(&text)
    }

    pub fn done(&mut self) -> io::Result<()> {
        self.line("")?;
        self.line("DONE")
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::path::PathBuf;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(500), "500 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(1_572_864), "1.5 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.0 GB");
        assert_eq!(format_size(5 * 1024u64.pow(4)), "5.0 TB");
        assert_eq!(format_size(2048 * 1024u64.pow(4)), "2048.0 TB");
    }

    #[test]
    fn test_format_timestamp() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 12, 30, 5).unwrap();
        assert_eq!(format_timestamp(&ts), "2024-01-15 12:30:05");
    }

    #[test]
    fn test_file_stat_reads_size_and_mtime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.jpg");
        fs::write(&path, b"12345").unwrap();

        let stat = FileStat::read(&path).unwrap();
        assert_eq!(stat.size, 5);
        // 刚写入的文件，修改时间不可能是 1970 年
        assert!(stat.modified.timestamp() > 0);
    }

    #[test]
    fn test_file_stat_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileStat::read(&dir.path().join("gone.jpg")).unwrap_err();
        assert!(matches!(err, WalkError::MetadataFailed { ref path, .. } if path.ends_with("gone.jpg")));
    }

    #[test]
    fn test_dry_run_lines_carry_prefix() {
        let album = Album::new("Trip", vec![PathBuf::from("/d/Trip/a.jpg")]);
        let stat = FileStat {
            size: 2048,
            modified: Utc.with_ymd_and_hms(2020, 2, 3, 4, 5, 6).unwrap(),
        };

        let mut reporter = ProgressReporter::new(Vec::new(), true);
        reporter.album(1, 1, &album, Some(2048), 1).unwrap();
        reporter.batch(1, 1, 1, 1, 1).unwrap();
        reporter.file(1, 1, 1, 1, &album.files[0], Some(&stat)).unwrap();
        reporter.totals(1, 1, 2048).unwrap();

        let out = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(
            out,
            "[DRY-RUN] Album 1/1 'Trip': 1 file(s), 2.0 KB, 1 batch(es)\n\
             [DRY-RUN]   Batch 1/1 [1/1] (1 file(s))\n\
             [DRY-RUN]     [1/1] batch:1/1  /d/Trip/a.jpg  (2.0 KB, 2020-02-03 04:05:06)\n\
             \n\
             [DRY-RUN] Total: 1 album(s), 1 file(s), 2.0 KB\n"
        );
    }

    #[test]
    fn test_upload_lines_have_no_prefix() {
        let album = Album::new("Trip", vec![PathBuf::from("a.jpg"), PathBuf::from("b.jpg")]);

        let mut reporter = ProgressReporter::new(Vec::new(), false);
        reporter.start().unwrap();
        reporter.album(2, 3, &album, None, 1).unwrap();
        reporter.batch(1, 1, 4, 7, 2).unwrap();
        reporter.file(9, 12, 2, 2, &album.files[1], None).unwrap();
        reporter.done().unwrap();

        let out = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(
            out,
            "START\n\
             Album 2/3 'Trip': 2 file(s), 1 batch(es)\n  \
             Batch 1/1 [4/7] (2 file(s))\n    \
             [9/12] batch:2/2  b.jpg\n\
             \n\
             DONE\n"
        );
    }
}
