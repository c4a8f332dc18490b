pub mod defaults;
pub mod export;
pub mod format;
pub mod import;
pub mod show;
pub mod validate;
