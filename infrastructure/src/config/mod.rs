//! Configuration file loading for comic-tutor
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `COMIC_TUTOR_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./comic-tutor.toml` or `./.comic-tutor.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/comic-tutor/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileApiConfig, FileConfig, FileGenerationConfig, FileModelsConfig,
    FileOutputConfig, FileOutputFormat,
};
pub use loader::ConfigLoader;
