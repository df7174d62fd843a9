// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error, info};
use std::io::Write;
use std::path::PathBuf;

use wosc_guides::app_config::{self, Config};
use wosc_guides::app_controller::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
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

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the hero, expert and guide pages and update the sitemap
    Build(BuildArgs),

    /// Fill missing FAQ/SEO keys in a locale dictionary from the fallback locale
    FillLocales(FillLocalesArgs),

    /// Generate shell completions for wosc-guides
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct BuildArgs {
    /// Site root; output, sitemap and the default content directory are relative to it
    #[arg(long, value_name = "DIR", default_value = ".")]
    site_root: PathBuf,

    /// Directory with the bot-produced JSON documents
    #[arg(long, value_name = "DIR", env = "BOT_JSONS")]
    content_dir: Option<PathBuf>,

    /// Do not draw a progress bar
    #[arg(long)]
    no_progress: bool,
}

#[derive(Parser, Debug)]
struct FillLocalesArgs {
    /// Locale dictionary to fill in place
    #[arg(value_name = "INDEX_JSON", default_value = "index.json")]
    index_path: PathBuf,
}

/// wosc-guides - static guide pages for the WOSC community site
#[derive(Parser, Debug)]
#[command(name = "wosc-guides")]
#[command(version)]
#[command(about = "Generate static guide pages from bot-produced JSON content")]
#[command(long_about = "wosc-guides renders hero, expert and standalone guide pages from JSON content files,
updates sitemap.xml with the generated URLs, and fills missing FAQ/SEO keys in the site's
locale dictionary.

EXAMPLES:
    wosc-guides build                               # Build from ../bros24-bot/jsons into ./guides
    BOT_JSONS=/data/jsons wosc-guides build         # Read content from another directory
    wosc-guides build --site-root /srv/www          # Build a site rooted elsewhere
    wosc-guides fill-locales i18n/index.json        # Fill missing locale keys in place
    wosc-guides completions bash > wosc-guides.bash # Generate bash completions

CONFIGURATION:
    Configuration is stored in wosc-guides.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "wosc-guides.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stdout = std::io::stdout();
            let _ = writeln!(
                stdout,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
    }
}

fn main() -> Result<()> {
    // Accept everything here; the effective level is narrowed with set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Some(level) = &cli.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    // Failures are reported through the logger, which writes to stdout
    if let Err(e) = run(cli) {
        error!("{:#}", e);
        log::logger().flush();
        std::process::exit(1);
    }

    Ok(())
}

fn run(cli: CommandLineOptions) -> Result<()> {
    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "wosc-guides", &mut std::io::stdout());
            Ok(())
        }
        Commands::Build(args) => {
            let controller = load_controller(&cli.config_path, cli.log_level.is_some())?;
            let content_dir = args.content_dir.as_deref();
            let report = if args.no_progress {
                controller.build(&args.site_root, content_dir)?
            } else {
                controller.build_interactive(&args.site_root, content_dir)?
            };
            info!("{} URLs registered", report.urls.len());
            Ok(())
        }
        Commands::FillLocales(args) => {
            let controller = load_controller(&cli.config_path, cli.log_level.is_some())?;
            controller.fill_locales(&args.index_path)?;
            Ok(())
        }
    }
}

/// Load the configuration and apply its log level unless one was given on the command line
fn load_controller(config_path: &std::path::Path, level_from_cli: bool) -> Result<Controller> {
    let config = Config::load_or_create(config_path)?;
    if !level_from_cli {
        log::set_max_level(config.log_level.to_level_filter());
    }
    Controller::with_config(config)
}
