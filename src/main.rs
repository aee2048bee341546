// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, error, info, warn};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::PathBuf;

use ccinspect::app_config::{self, Config, DEFAULT_CONFIG_FILE};
use ccinspect::renderer;
use ccinspect::replay::{self, DecodeRun, FaultPolicy};

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
    /// Decode a recorded caption event log and print the transcripts
    Decode(DecodeArgs),

    /// Generate shell completions for ccinspect
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct DecodeArgs {
    /// JSON Lines event log to decode
    #[arg(value_name = "EVENT_LOG")]
    event_log: PathBuf,

    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Log and skip events that fail to decode instead of aborting
    #[arg(long)]
    skip_faults: bool,

    /// Do not prefix caption boundaries with their time
    #[arg(long)]
    no_timestamps: bool,

    /// Line 21 channel to print (repeatable)
    #[arg(long = "channel", value_name = "N")]
    channels: Vec<u8>,

    /// DTVCC service to print (repeatable)
    #[arg(long = "service", value_name = "N")]
    services: Vec<u8>,
}

/// ccinspect - Closed caption code inspector
///
/// Decodes CEA-608 and CEA-708 caption code events into timestamped caption
/// elements and prints one transcript per channel and service.
#[derive(Parser, Debug)]
#[command(name = "ccinspect")]
#[command(version)]
#[command(about = "Closed caption code inspector")]
#[command(long_about = "ccinspect decodes recorded CEA-608 / CEA-708 caption code events into caption elements.

EXAMPLES:
    ccinspect decode events.jsonl                        # Decode with the default config
    ccinspect decode --skip-faults events.jsonl          # Keep going past decode faults
    ccinspect decode --channel 1 --service 1 events.jsonl
    ccinspect decode --no-timestamps events.jsonl        # Canonical element text only
    ccinspect completions bash > ccinspect.bash          # Generate bash completions

CONFIGURATION:
    Configuration is read from ccinspect.json by default. You can specify a
    different file with --config. Command line flags override file values.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
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
        log::set_boxed_logger(Box::new(CustomLogger::new(LevelFilter::Trace)))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour and tag for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, tag) = Self::style_for_level(record.level());
            let _ = writeln!(std::io::stderr(), "{}{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "ccinspect", &mut std::io::stdout());
            Ok(())
        }
        Commands::Decode(args) => run_decode(args).inspect_err(|e| error!("{:#}", e)),
    }
}

fn run_decode(options: DecodeArgs) -> Result<()> {
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.into());
    }

    if !options.config.exists() {
        debug!("Config file not found at '{}', using defaults", options.config.display());
    }
    let mut config = Config::load_or_default(&options.config)?;

    // Override config with CLI options if provided
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
    if options.skip_faults {
        config.decode.fault_policy = FaultPolicy::Skip;
    }
    if options.no_timestamps {
        config.render.timestamps = false;
    }
    if !options.channels.is_empty() {
        config.render.channels = options.channels.clone();
    }
    if !options.services.is_empty() {
        config.render.services = options.services.clone();
    }

    config.validate().context("Configuration validation failed")?;
    log::set_max_level(config.log_level.into());

    let file = File::open(&options.event_log)
        .context(format!("Failed to open event log: {}", options.event_log.display()))?;
    let events = replay::read_event_log(BufReader::new(file))?;
    info!("Decoding {} events from {}", events.len(), options.event_log.display());

    let mut run = DecodeRun::new(config.decode.fault_policy);
    run.feed_all(&events).map_err(|e| anyhow!(e))?;
    let (summary, engine) = run.finish();
    if summary.skipped > 0 {
        warn!("{} of {} events were skipped", summary.skipped, summary.events);
    }

    let asset = options
        .event_log
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let render_options = config.render.options();
    let mut stdout = std::io::stdout().lock();

    for (channel, sequence) in engine.line21_channels() {
        if sequence.is_empty() || !config.render.wants_channel(channel) {
            continue;
        }
        writeln!(stdout, "{}", renderer::line21_header(&asset, channel))?;
        writeln!(stdout, "{}\n", renderer::render_transcript(sequence.elements(), render_options))?;
    }

    for (service, sequence) in engine.dtvcc_services() {
        if sequence.is_empty() || !config.render.wants_service(service) {
            continue;
        }
        writeln!(stdout, "{}", renderer::dtvcc_header(&asset, service))?;
        writeln!(stdout, "{}\n", renderer::render_transcript(sequence.elements(), render_options))?;
    }

    Ok(())
}
