pub mod logging;

pub use logging::{log_config, log_startup, mask_secret};
