pub mod album_scanner;
pub mod immich_uploader;
pub mod progress_reporter;

pub use album_scanner::scan_albums;
pub use immich_uploader::{BatchUploader, ImmichUploader};
pub use progress_reporter::{format_size, format_timestamp, FileStat, ProgressReporter};
