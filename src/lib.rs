//! # flickrtoimmich
//!
//! 把导出的 Flickr 相册目录分批上传到 Immich，并提供只读的 Flickr 相册列表工具
//!
//! ## 架构设计
//!
//! ### ① 模型层（Models）
//! - `models/` - 相册、批次、上传结果、Flickr 响应结构、凭据加载
//!
//! ### ② 业务能力层（Services / Clients）
//! - `AlbumScanner` - 目录树 → 相册列表
//! - `ProgressReporter` - 相册 / 批次 / 文件进度输出
//! - `ImmichUploader` - 调用外部 `immich upload`，转发两路输出
//! - `FlickrClient` - Flickr REST API（只读）
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量上传流程
//! - `orchestrator/flickr_lister` - Flickr 相册列表流程
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use clients::FlickrClient;
pub use config::{Config, UploadOptions};
pub use error::{AppError, AppResult};
pub use models::{Album, Batch, UploadOutcome, UploadPlan};
pub use orchestrator::{App, RunSummary};
pub use services::{BatchUploader, ImmichUploader};
