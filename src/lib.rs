pub mod audio;
pub mod config;
pub mod logging;
pub mod run;
pub mod scope;
pub mod terminal_restore;
pub mod waveform;

pub use logging::{init_logging, log_debug, log_file_path};
