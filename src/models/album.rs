use std::path::PathBuf;

/// 相册：一个子目录及其下所有待上传文件（已按路径排序）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    /// 目录名，同时作为 immich 的相册名
    pub name: String,
    /// 待上传文件
    pub files: Vec<PathBuf>,
}

/// 批次：相册文件列表中的一段连续切片
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batch<'a> {
    /// 相册内批次编号（从 1 开始）
    pub number: usize,
    pub files: &'a [PathBuf],
}

impl Album {
    pub fn new(name: impl Into<String>, files: Vec<PathBuf>) -> Self {
        Self {
            name: name.into(),
            files,
        }
    }

    /// 批次数量 = ceil(文件数 / 批次大小)
    pub fn batch_count(&self, batch_size: usize) -> usize {
        self.files.len().div_ceil(batch_size)
    }

    /// 按批次大小切分文件列表
    ///
    /// `batch_size` 必须 >= 1（由 `UploadOptions` 保证）
    pub fn batches(&self, batch_size: usize) -> impl Iterator<Item = Batch<'_>> {
        self.files
            .chunks(batch_size)
            .enumerate()
            .map(|(idx, files)| Batch {
                number: idx + 1,
                files,
            })
    }
}

/// 上传计划：扫描得到的全部相册和全局计数
#[derive(Debug, Clone)]
pub struct UploadPlan {
    pub albums: Vec<Album>,
    pub batch_size: usize,
}

impl UploadPlan {
    pub fn new(albums: Vec<Album>, batch_size: usize) -> Self {
        Self { albums, batch_size }
    }

    pub fn total_albums(&self) -> usize {
        self.albums.len()
    }

    pub fn total_files(&self) -> usize {
        self.albums.iter().map(|a| a.files.len()).sum()
    }

    pub fn total_batches(&self) -> usize {
        self.albums.iter().map(|a| a.batch_count(self.batch_size)).sum()
    }
}

/// 单个批次的上传结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadOutcome {
    pub success: bool,
    /// 被信号终止时没有退出码
    pub exit_code: Option<i32>,
}

impl UploadOutcome {
    pub fn from_exit_code(exit_code: Option<i32>) -> Self {
        Self {
            success: exit_code == Some(0),
            exit_code,
        }
    }
}
