// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use dualsub::app_config::{self, Config};
use dualsub::app_controller::Controller;
use dualsub::desync::DesyncMode;

/// CLI Wrapper for DesyncMode to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliDesyncMode {
    Left,
    Right,
    Max,
    Min,
}

impl From<CliDesyncMode> for DesyncMode {
    fn from(cli_mode: CliDesyncMode) -> Self {
        match cli_mode {
            CliDesyncMode::Left => DesyncMode::UseLeftTime,
            CliDesyncMode::Right => DesyncMode::UseRightTime,
            CliDesyncMode::Max => DesyncMode::UseMaxTime,
            CliDesyncMode::Min => DesyncMode::UseMinTime,
        }
    }
}

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
    /// Merge two subtitle files into a dual subtitle
    Merge(MergeArgs),

    /// Generate shell completions for dualsub
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct MergeArgs {
    /// Subtitle shown first (top)
    #[arg(value_name = "LEFT")]
    left: PathBuf,

    /// Subtitle shown second (bottom), or the translation in translate mode
    #[arg(value_name = "RIGHT")]
    right: PathBuf,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<String>,

    /// Extend every caption by this many seconds
    #[arg(short, long, value_name = "SECONDS")]
    extend: Option<u64>,

    /// Progressive layout (no padding for missing captions)
    #[arg(long)]
    progressive: bool,

    /// Placement of desynchronized captions
    #[arg(short, long, value_enum)]
    desync: Option<CliDesyncMode>,

    /// Name the output as a translation of the left file
    #[arg(short, long)]
    translate: bool,

    /// Use the "merged" label instead of "translated" (with --translate)
    #[arg(long, requires = "translate")]
    merge_label: bool,

    /// Encoding of the input and output files (UTF-8, ISO-8859-1)
    #[arg(long)]
    charset: Option<String>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// dualsub - merge two subtitle files into one dual-language subtitle
#[derive(Parser, Debug)]
#[command(name = "dualsub")]
#[command(version)]
#[command(about = "Dual subtitle merger")]
#[command(long_about = "dualsub aligns two SRT files by timestamp and writes a single dual subtitle.

EXAMPLES:
    dualsub merge movie.en.srt movie.es.srt              # Merge using default config
    dualsub merge -f movie.en.srt movie.es.srt           # Force overwrite existing output
    dualsub merge -e 2 movie.en.srt movie.es.srt         # Extend captions by 2 seconds
    dualsub merge -d max movie.en.srt movie.es.srt       # Desynchronized captions use max time
    dualsub merge -t movie.srt movie.translated.srt      # Translation output naming
    dualsub completions bash > dualsub.bash              # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation, filtered by the global max level
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
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
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
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

fn main() -> Result<()> {
    // Info by default, adjusted once the config is loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "dualsub", &mut std::io::stdout());
            Ok(())
        }
        Commands::Merge(args) => run_merge(args),
    }
}

fn load_config(options: &MergeArgs) -> Result<Config> {
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        Config::from_file(config_path)?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);
        let config = Config::default();
        config.save(config_path)
            .context(format!("Failed to write default config to file: {}", config_path))?;
        config
    };

    // Command line options override the file
    if let Some(output_dir) = &options.output_dir {
        config.output_dir = output_dir.clone();
    }
    if let Some(secs) = options.extend {
        config.extend = true;
        config.extend_secs = secs;
    }
    if options.progressive {
        config.progressive = true;
    }
    if let Some(mode) = &options.desync {
        config.desync_mode = DesyncMode::from(mode.clone()).code() as i64;
    }
    if options.translate {
        config.translate = true;
    }
    if options.merge_label {
        config.merge_label = true;
    }
    if let Some(charset) = &options.charset {
        config.charset = charset.clone();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    Ok(config)
}

fn run_merge(options: MergeArgs) -> Result<()> {
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let config = load_config(&options)?;
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config)?;

    for path in [&options.left, &options.right] {
        if !path.is_file() {
            return Err(anyhow!("Input path does not exist: {:?}", path));
        }
    }

    controller.merge_files(&options.left, &options.right, options.force_overwrite)?;

    Ok(())
}
