// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug};
use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};

use tvsqlgen::app_config::{self, Config};
use tvsqlgen::Controller;

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
    /// Generate shell completions for tvsqlgen
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// tvsqlgen - TV series fixture to SQL generator
///
/// Reads countries.xml, genres.xml and tvseries.xml and writes five
/// numbered INSERT scripts that must be executed in order.
#[derive(Parser, Debug)]
#[command(name = "tvsqlgen")]
#[command(version)]
#[command(about = "Generate ordered SQL INSERT scripts from TV series XML fixtures")]
#[command(long_about = "tvsqlgen converts XML fixtures into SQL migration scripts.

OUTPUT (in execution order):
    1_insert_into_countries_tb.sql
    2_insert_into_genres_tb.sql
    3_insert_into_tvseries_tb.sql
    4_insert_into_tvcountry_tb.sql
    5_insert_into_tvgenre_tb.sql

EXAMPLES:
    tvsqlgen                                  # Read ./xml, write into ./
    tvsqlgen -i fixtures -o migrations        # Custom directories
    tvsqlgen --seed 7 --no-wait               # Reproducible series order
    tvsqlgen completions bash > tvsqlgen.bash # Generate bash completions")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path (defaults are used when it does not exist)
    #[arg(short, long, default_value = "tvsqlgen.json")]
    config_path: PathBuf,

    /// Directory holding the XML fixtures
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Directory receiving the SQL scripts
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Fixed seed for the series order
    #[arg(short, long)]
    seed: Option<u64>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Print every parsed series after shuffling
    #[arg(long)]
    dump: bool,

    /// Exit without waiting for Enter
    #[arg(long)]
    no_wait: bool,
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

    // @returns: ANSI color for log level
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
            let _ = writeln!(
                std::io::stderr(),
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
    CustomLogger::init(LevelFilter::Warn)?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "tvsqlgen", &mut std::io::stdout());
        return Ok(());
    }

    // Errors are reported, not turned into an exit status
    if let Err(e) = run_generate(&cli) {
        println!("{:#}", e);
    }

    if !cli.no_wait {
        wait_for_enter();
    }

    Ok(())
}

fn run_generate(options: &CommandLineOptions) -> Result<()> {
    let mut config = Config::load_or_default(&options.config_path)
        .context("Failed to load configuration")?;

    // Override config with CLI options if provided
    if let Some(input_dir) = &options.input_dir {
        config.input_dir = input_dir.clone();
    }
    if let Some(output_dir) = &options.output_dir {
        config.output_dir = output_dir.clone();
    }
    if options.seed.is_some() {
        config.shuffle_seed = options.seed;
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    log::set_max_level(config.log_level.to_level_filter());
    debug!("Using configuration: {:?}", config);

    let controller = Controller::with_config(config)?
        .with_progress(std::io::stderr().is_terminal());
    let summary = controller.run()?;

    if options.dump {
        for series in &summary.series {
            println!("{}", series);
        }
    }

    Ok(())
}

fn wait_for_enter() {
    print!("Push 'Enter' to exit ...");
    let _ = std::io::stdout().flush();
    let mut line = String::new();
    let _ = std::io::stdin().lock().read_line(&mut line);
}
