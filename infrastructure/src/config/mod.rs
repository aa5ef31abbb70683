//! Configuration file support

pub mod file_config;
pub mod loader;

pub use file_config::{FileBehaviorConfig, FileConfig, FileModelsConfig, FileProviderConfig};
pub use loader::ConfigLoader;
