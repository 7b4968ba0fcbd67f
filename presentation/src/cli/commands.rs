//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the finished comic
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored console rendering with every panel
    Full,
    /// Plain narration only
    Text,
    /// JSON output
    Json,
}

impl From<OutputFormat> for comic_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => comic_domain::OutputFormat::Full,
            OutputFormat::Text => comic_domain::OutputFormat::Text,
            OutputFormat::Json => comic_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for comic-tutor
#[derive(Parser, Debug)]
#[command(name = "comic-tutor")]
#[command(author, version, about = "Explain anything as a four-panel comic")]
#[command(long_about = r#"
Comic Tutor answers a question with a short educational comic.

Each question goes through three steps:
1. Expert: a famous figure who knows the topic is chosen as your guide
2. Story: the guide writes a titled script of panels and a summary
3. Drawing: every panel is illustrated, all at the same time

The API key is read from the API_KEY environment variable
(configurable with [api] api_key_env).

Configuration files are loaded from (in priority order):
1. COMIC_TUTOR_* environment variables (e.g. COMIC_TUTOR_MODELS__TEXT)
2. --config <path>          Explicit config file
3. ./comic-tutor.toml       Project-level config
4. ~/.config/comic-tutor/config.toml   Global config

Example:
  comic-tutor "Why is the sky blue?"
  comic-tutor -o json "How do volcanoes erupt?"
  comic-tutor --html volcano.html "How do volcanoes erupt?"
  comic-tutor -i
"#)]
pub struct Cli {
    /// The question to explain (not required in interactive mode)
    pub question: Option<String>,

    /// Start interactive mode
    #[arg(short, long)]
    pub interactive: bool,

    /// Model for the expert and story steps
    #[arg(long, value_name = "MODEL")]
    pub text_model: Option<String>,

    /// Model for panel illustrations
    #[arg(long, value_name = "MODEL")]
    pub image_model: Option<String>,

    /// Audience phrase, e.g. "for a high-school student"
    #[arg(long, value_name = "PHRASE")]
    pub audience: Option<String>,

    /// Maximum number of panels drawn at the same time
    #[arg(long, value_name = "N")]
    pub max_concurrent_images: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Also write the finished comic as a standalone HTML page
    #[arg(long, value_name = "PATH")]
    pub html: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Write logs to daily-rotated files in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration sources and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,
}
