//! Presentation layer for snapquiz
//!
//! This crate contains CLI definitions, console output formatting, and
//! progress reporting for the capture-and-answer flow.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
