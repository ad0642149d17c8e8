//! 相册扫描服务 - 业务能力层
//!
//! 只负责"把目录树变成相册列表"，不关心上传和输出

use crate::error::WalkError;
use crate::models::Album;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// 扫描根目录下的所有相册
///
/// 每个直接子目录是一个相册；递归查找扩展名匹配的普通文件。
/// 没有匹配文件的目录不会出现在结果中。
///
/// # 参数
/// - `root`: 相册根目录
/// - `extensions`: 小写、带前导点的扩展名集合
///
/// # 返回
/// 按目录名排序的相册列表，相册内文件按路径排序。
/// 空路径按当前目录处理，结果路径不带开头的 `./`
pub fn scan_albums(root: &Path, extensions: &BTreeSet<String>) -> Result<Vec<Album>, WalkError> {
    let root = if root.as_os_str().is_empty() {
        Path::new(".")
    } else {
        root
    };
    let mut album_dirs = Vec::new();
    let entries = fs::read_dir(root).map_err(|source| WalkError::ReadDirFailed {
        path: root.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| WalkError::ReadDirFailed {
            path: root.to_path_buf(),
            source,
        })?;
        let path = strip_cur_dir(entry.path());
        if path.is_dir() {
            album_dirs.push(path);
        }
    }
    album_dirs.sort();

    let mut albums = Vec::new();
    for dir in album_dirs {
        let files = collect_files(&dir, extensions)?;
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if files.is_empty() {
            debug!("跳过空相册: {}", name);
            continue;
        }

        debug!("相册 '{}': {} 个文件", name, files.len());
        albums.push(Album::new(name, files));
    }

    Ok(albums)
}

/// 递归收集目录下所有匹配的文件，按路径排序
fn collect_files(dir: &Path, extensions: &BTreeSet<String>) -> Result<Vec<PathBuf>, WalkError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1) {
        let entry = entry.map_err(|source| WalkError::TraverseFailed {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() && has_accepted_extension(path, extensions) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

/// 去掉开头的 `.` 组件：`./A/x.jpg` → `A/x.jpg`
fn strip_cur_dir(path: PathBuf) -> PathBuf {
    let mut components = path.components();
    if components.next() == Some(Component::CurDir) {
        components.as_path().to_path_buf()
    } else {
        path
    }
}

/// 扩展名匹配（不区分大小写）
pub fn has_accepted_extension(path: &Path, extensions: &BTreeSet<String>) -> bool {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .is_some_and(|ext| extensions.contains(&ext))
}
