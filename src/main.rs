// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::app_controller::AppController;

mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod history;
mod language_utils;
mod services;
mod translation;

/// CLI wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a document through the selected services (default command)
    Translate(TranslateArgs),

    /// List the known translation services and their configuration state
    ListServices {
        /// Configuration file path
        #[arg(short, long, default_value = "conf.json")]
        config_path: String,
    },

    /// Show past translation batches
    History {
        /// Maximum number of entries to show
        #[arg(short, long, default_value_t = 10)]
        limit: usize,

        /// Configuration file path
        #[arg(short, long, default_value = "conf.json")]
        config_path: String,
    },

    /// Generate shell completions for multitrans
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Input document to translate
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Write per-service output files derived from this path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Source language code (e.g. 'en', 'de'), or 'auto'
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g. 'ru', 'fr')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Comma-separated service ids to translate with
    #[arg(long, value_delimiter = ',')]
    services: Option<Vec<String>>,

    /// Maximum chunk size in characters
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Number of parallel translation workers
    #[arg(long)]
    max_workers: Option<usize>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// multitrans - Parallel multi-service document translator
///
/// Translates documents through several machine translation services at
/// once so their outputs can be compared side by side.
#[derive(Parser, Debug)]
#[command(name = "multitrans")]
#[command(version = "1.0.0")]
#[command(about = "Parallel multi-service document translator")]
#[command(long_about = "multitrans splits a document into sentence-aligned chunks and translates \
them through several services in parallel.

EXAMPLES:
    multitrans article.txt                         # Translate using default config
    multitrans -s en -t de article.txt             # Translate from English to German
    multitrans --services deepl,google article.txt # Compare two services
    multitrans -o out.txt article.txt              # Write out.deepl.txt etc.
    multitrans list-services                       # Show configured services
    multitrans history                             # Show recent batches
    multitrans completions bash > multitrans.bash  # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different file with --config-path. If the file doesn't exist, a default
    one will be created automatically.

SUPPORTED SERVICES:
    deepl      - DeepL (works without an API key via the free endpoint)
    google     - Google Cloud Translation (requires API key)
    yandex     - Yandex Cloud Translate (requires API key)
    openai     - OpenAI chat completions (requires API key)
    openrouter - OpenRouter gateway (requires API key)
    groq       - Groq (requires API key)
    anthropic  - Anthropic Claude (requires API key)
    localai    - Self-hosted OpenAI-compatible server (requires endpoint)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input document to translate
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Write per-service output files derived from this path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Source language code (e.g. 'en', 'de'), or 'auto'
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g. 'ru', 'fr')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Comma-separated service ids to translate with
    #[arg(long, value_delimiter = ',')]
    services: Option<Vec<String>>,

    /// Maximum chunk size in characters
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Number of parallel translation workers
    #[arg(long)]
    max_workers: Option<usize>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// Timestamped, color-coded stderr logger
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:<5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Start at info; the level is adjusted once the config is loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "multitrans", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::ListServices { config_path }) => {
            let config = load_config(&config_path, &None)?;
            AppController::new(config).list_services();
            Ok(())
        }
        Some(Commands::History { limit, config_path }) => {
            let config = load_config(&config_path, &None)?;
            AppController::new(config).show_history(limit)
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => {
            // No subcommand: treat the top-level args as a translate request
            let input_path = cli
                .input_path
                .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;
            let args = TranslateArgs {
                input_path,
                output: cli.output,
                source_language: cli.source_language,
                target_language: cli.target_language,
                services: cli.services,
                chunk_size: cli.chunk_size,
                max_workers: cli.max_workers,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_translate(args).await
        }
    }
}

/// Load configuration, creating a default file if none exists
fn load_config(config_path: &str, log_level: &Option<CliLogLevel>) -> Result<Config> {
    let mut config = if Path::new(config_path).exists() {
        Config::load(config_path)?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);
        let config = Config::default();
        config.save(config_path)?;
        config
    };
    if let Some(level) = log_level {
        config.log_level = level.clone().into();
    }
    Ok(config)
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    if let Some(level) = &options.log_level {
        log::set_max_level(level_filter(&level.clone().into()));
    }

    let mut config = load_config(&options.config_path, &options.log_level)?;

    // CLI options override the configuration file
    if let Some(source) = &options.source_language {
        config.source_language = source.clone();
    }
    if let Some(target) = &options.target_language {
        config.target_language = target.clone();
    }
    if let Some(services) = &options.services {
        config.selected_services = services.clone();
    }
    if let Some(chunk_size) = options.chunk_size {
        config.chunk_size = chunk_size;
    }
    if let Some(max_workers) = options.max_workers {
        config.max_workers = max_workers;
    }

    config.validate()?;

    if options.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    if !options.input_path.is_file() {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    let controller = AppController::new(config);
    controller
        .run(&options.input_path, options.output.as_deref())
        .await
}
