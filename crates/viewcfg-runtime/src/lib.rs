// Runtime layer - options, configuration cache, persistent store, logging
// Async file I/O lives here; the engine stays synchronous

pub mod cache;
pub mod error;
pub mod logging;
pub mod options;
pub mod store;

pub use cache::ConfigurationCache;
pub use error::{Error, Result};
pub use logging::{LogConfig, LogFormat, init_logging};
pub use options::{CONFIG_FOLDER_ENV, VisualizerOptions};
pub use store::{ConfigurationStore, document_name};
