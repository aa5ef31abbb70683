//! CLI entrypoint for snapquiz
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use snapquiz_application::{
    ChatGateway, ExtractQuestionUseCase, GatherAnswersInput, GatherAnswersUseCase, NoObserver,
    ResultsStore,
};
use snapquiz_domain::Model;
use snapquiz_infrastructure::{ConfigLoader, FileConfig, OpenRouterGateway, encode_image_file};
use snapquiz_presentation::{Cli, ConsoleFormatter, OutputFormat, ProgressReporter};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting snapquiz");

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!(e.to_string()))?
    };

    let api_key = cli
        .api_key
        .clone()
        .or_else(|| config.resolve_api_key())
        .with_context(|| {
            format!(
                "No API key found. Set ${} or [provider].api_key in the config file.",
                config.provider.api_key_env
            )
        })?;

    // === Dependency Injection ===
    // Create infrastructure adapter (OpenRouter gateway)
    let gateway: Arc<dyn ChatGateway> = Arc::new(build_gateway(&cli, &config));

    // Catalog mode: print zero-cost models and exit
    if cli.list_free_models {
        let mut free: Vec<String> = gateway
            .list_models(Some(&api_key))
            .await?
            .into_iter()
            .filter(|model| model.is_free())
            .map(|model| model.id)
            .collect();
        free.sort();

        for id in &free {
            println!("{id}");
        }
        if free.is_empty() {
            eprintln!("No zero-cost models in the catalog.");
        }
        return Ok(());
    }

    // Capture mode: image path is required
    let image = match &cli.image {
        Some(path) => path,
        None => bail!("An image path is required. Use --list-free-models to browse the catalog."),
    };

    let models = selected_models(&cli, &config)?;
    let vision_model: Model = cli
        .vision_model
        .clone()
        .unwrap_or_else(|| config.models.vision.clone())
        .parse()?;

    // Vision extraction; a failure here aborts the whole capture
    let image_data = encode_image_file(image)?;
    let capture = ExtractQuestionUseCase::new(Arc::clone(&gateway))
        .execute(&api_key, &vision_model, &image_data)
        .await?;

    if cli.show_transcript && !capture.transcript.is_empty() {
        println!("{}", capture.transcript);
        println!();
    }

    if !capture.question.is_detected() {
        println!("{}", capture.question.question());
        return Ok(());
    }

    if !cli.quiet {
        println!();
        println!("Question: {}", capture.question.question());
        if capture.question.is_multiple_choice() {
            println!("{}", capture.question.options());
        }
        println!(
            "Models: {}",
            models
                .iter()
                .map(|m| m.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!();
    }

    // Create use case with injected gateway and explicit shared state
    let store = Arc::new(ResultsStore::new());
    let use_case = GatherAnswersUseCase::new(gateway, store);
    let input = GatherAnswersInput::new(capture.question.clone(), models, api_key)
        .with_params(config.execution_params());

    // Execute with or without progress reporting
    let batch = if cli.quiet {
        use_case.execute(input, &NoObserver).await?
    } else {
        let progress = ProgressReporter::new();
        use_case.execute(input, &progress).await?
    };

    // Output results
    let output = match cli.output {
        OutputFormat::Full => ConsoleFormatter::format(&capture.question, &batch),
        OutputFormat::Answers => ConsoleFormatter::format_answers_only(&batch),
        OutputFormat::Json => ConsoleFormatter::format_json(&capture.question, &batch),
    };

    println!("{}", output);

    Ok(())
}

fn build_gateway(cli: &Cli, config: &FileConfig) -> OpenRouterGateway {
    let base_url = cli
        .base_url
        .clone()
        .unwrap_or_else(|| config.provider.base_url.clone());

    let mut gateway = OpenRouterGateway::with_base_url(base_url);
    if let Some(referer) = &config.provider.referer {
        gateway = gateway.with_referer(referer);
    }
    if let Some(title) = &config.provider.app_title {
        gateway = gateway.with_app_title(title);
    }
    gateway
}

fn selected_models(cli: &Cli, config: &FileConfig) -> Result<Vec<Model>> {
    let ids = if cli.model.is_empty() {
        config.models.selected.clone()
    } else {
        cli.model.clone()
    };

    if ids.is_empty() {
        bail!(
            "No models selected. Pass -m/--model or set [models].selected in the config file \
             (try --list-free-models to browse the catalog)."
        );
    }

    ids.iter()
        .map(|id| id.parse::<Model>().map_err(Into::into))
        .collect()
}
