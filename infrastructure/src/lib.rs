//! Infrastructure layer for snapquiz
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the OpenRouter chat gateway, configuration file
//! loading, and image payload encoding.

pub mod config;
pub mod image;
pub mod openrouter;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileBehaviorConfig, FileConfig, FileModelsConfig, FileProviderConfig,
};
pub use image::{ImageError, encode_image_file};
pub use openrouter::gateway::OpenRouterGateway;
