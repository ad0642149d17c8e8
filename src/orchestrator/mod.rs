//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量上传处理器
//! - 扫描相册目录，计算全局计数
//! - 按"相册 → 批次 → 文件"顺序输出进度
//! - 逐批调用上传程序，失败的批次只记录不中断
//!
//! ### `flickr_lister` - Flickr 列表处理器
//! - 列出用户的相册及照片/视频数量
//! - 列出单个相册中的文件
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator (处理 Vec<Album> / Vec<Photoset>)
//!     ↓
//! services (能力层：scan / report / upload)
//!     ↓
//! clients / models (Flickr API、数据结构、凭据加载)
//! ```

pub mod batch_processor;
pub mod flickr_lister;

pub use batch_processor::{App, RunSummary};
pub use flickr_lister::{dry_run_album, dry_run_user, list_albums, UserListing};
