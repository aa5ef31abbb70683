//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for answer batches
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Question, options, and per-model answers with timing
    Full,
    /// One answer line per model
    Answers,
    /// JSON output
    Json,
}

/// CLI arguments for snapquiz
#[derive(Parser, Debug)]
#[command(name = "snapquiz")]
#[command(author, version, about = "Photograph a quiz question, ask every model at once")]
#[command(long_about = r#"
snapquiz reads a photographed question from an image file, extracts the
question text (and multiple-choice options, if any) with a vision model,
then asks every selected model in parallel for a short answer.

Each model is retried up to twice with a one-second backoff; off-format
answers get one corrective follow-up before the retry. Results are shown
per model with elapsed time.

Configuration files are loaded from (in priority order):
1. --config <path>      Explicit config file
2. ./snapquiz.toml      Project-level config
3. ~/.config/snapquiz/config.toml   Global config

The API key comes from $OPENROUTER_API_KEY (or [provider].api_key).

Example:
  snapquiz photo.jpg -m meta-llama/llama-3.3-70b-instruct:free
  snapquiz photo.jpg -m vendor/m1 -m vendor/m2 --output json
  snapquiz --list-free-models
"#)]
pub struct Cli {
    /// Image file containing the question (not required with --list-free-models)
    pub image: Option<PathBuf>,

    /// Models to fan the question out to (can be specified multiple times)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Vec<String>,

    /// Vision model used to extract the question from the image
    #[arg(long, value_name = "MODEL")]
    pub vision_model: Option<String>,

    /// API key (overrides the environment variable and config file)
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Base URL of the chat-completions API
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// List zero-cost models from the provider catalog and exit
    #[arg(long)]
    pub list_free_models: bool,

    /// Print the raw vision transcript before the results
    #[arg(long)]
    pub show_transcript: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "full")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,
}
