//! CLI entrypoint for comic-tutor
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod logging;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use comic_application::{
    AssembleComicUseCase, ComicSession, GenerationParams, NoObserver, SessionObserver,
};
use comic_domain::{AppStatus, AudienceLevel, Model, OutputFormat};
use comic_infrastructure::{
    ApiKey, ConfigLoader, ConfigValidationError, FileConfig, GeminiConfig, GeminiGateway,
};
use comic_presentation::{
    Cli, ComicRepl, ConsoleFormatter, HtmlRenderer, ProgressReporter, SimpleProgress,
    SubmissionOutcome, submit_and_wait,
};
use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = logging::init(cli.verbose, cli.log_dir.as_deref())?;

    info!("Starting comic-tutor");

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        let config = load_config(&cli)?;
        println!();
        println!("{}", config.to_toml_string()?);
        return Ok(ExitCode::SUCCESS);
    }

    let config = load_config(&cli)?;

    if cli.no_color || !config.output.color {
        colored::control::set_override(false);
    }

    let params = generation_params(&cli, &config)?;
    let format: OutputFormat = cli
        .output
        .map(Into::into)
        .or(config.output.format)
        .unwrap_or_default();
    debug!("Generation params: {:?}, output: {:?}", params, format);

    // === Dependency Injection ===
    // The credential is checked before anything is asked of the user
    let api_key = ApiKey::from_env(&config.api.api_key_env)
        .map_err(|e| anyhow!("{}. Set it to your Gemini API key.", e))?;
    let gateway = Arc::new(GeminiGateway::new(
        GeminiConfig::new(api_key)
            .with_base_url(config.api.base_url.clone())
            .with_timeout(config.api.timeout()),
    )?);

    let observer: Arc<dyn SessionObserver> = if cli.quiet || !config.output.show_progress {
        Arc::new(NoObserver)
    } else if std::io::stderr().is_terminal() {
        Arc::new(ProgressReporter::new())
    } else {
        Arc::new(SimpleProgress)
    };

    let assembler = Arc::new(AssembleComicUseCase::new(gateway, params));
    let session = Arc::new(ComicSession::new(assembler, observer));

    // Interactive mode
    if cli.interactive {
        ComicRepl::new(session).with_format(format).run().await?;
        return Ok(ExitCode::SUCCESS);
    }

    // Single question mode - question is required
    let question = match cli.question {
        Some(q) => q,
        None => bail!("Question is required. Use --interactive for interactive mode."),
    };

    if !cli.quiet && format != OutputFormat::Json {
        println!();
        println!("+============================================================+");
        println!("|           Comic Tutor - Learn with a Comic                 |");
        println!("+============================================================+");
        println!();
        println!("Question: {}", question.trim());
        println!();
    }

    let status = match submit_and_wait(&session, &question).await {
        SubmissionOutcome::Rejected => bail!("Question cannot be empty."),
        SubmissionOutcome::Cancelled => {
            eprintln!("Cancelled.");
            return Ok(ExitCode::from(130));
        }
        SubmissionOutcome::Finished(status) => status,
    };

    let output = session.with_session(|s| ConsoleFormatter::format_session(s, format));
    println!("{}", output);

    if let Some(path) = &cli.html
        && let Some(html) = session.with_session(HtmlRenderer::render_session)
    {
        std::fs::write(path, html)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        eprintln!("Saved {}", path.display());
    }

    Ok(if status == AppStatus::Success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        if let Some(path) = &cli.config
            && !path.exists()
        {
            bail!("Config file not found: {}", path.display());
        }
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow!("Invalid configuration: {}", e))?
    };
    config.validate()?;
    Ok(config)
}

/// File configuration with command-line overrides applied
fn generation_params(cli: &Cli, config: &FileConfig) -> Result<GenerationParams> {
    let mut params = config.to_generation_params();
    if let Some(model) = &cli.text_model {
        params = params.with_text_model(parse_model(model).context("Invalid --text-model")?);
    }
    if let Some(model) = &cli.image_model {
        params = params.with_image_model(parse_model(model).context("Invalid --image-model")?);
    }
    if let Some(audience) = &cli.audience {
        params = params.with_audience(AudienceLevel::new(audience.as_str()));
    }
    if cli.max_concurrent_images.is_some() {
        params = params.with_max_concurrent_images(cli.max_concurrent_images);
    }
    Ok(params)
}

fn parse_model(name: &str) -> Result<Model, ConfigValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ConfigValidationError::EmptyModelName);
    }
    let Ok(model) = name.parse::<Model>();
    Ok(model)
}
