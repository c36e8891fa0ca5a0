// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{debug, error, info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use cmx_edl::app_config::{self, Config};
use cmx_edl::file_utils::FileManager;
use cmx_edl::{Edl, Framerate};

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
    /// Parse an EDL file, or every EDL file under a folder, and report the result
    Check {
        /// EDL file or directory to check
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,
    },

    /// Write an EDL back out in canonical form
    Print {
        /// EDL file to print
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Force overwrite of an existing output file
        #[arg(short, long)]
        force_overwrite: bool,
    },

    /// Show framerate, title and record span of an EDL
    Info {
        /// EDL file to inspect
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,
    },

    /// Generate shell completions for cmx-edl
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// cmx-edl - CMX Edit Decision List tool
///
/// Parses CMX3600 style EDL files, validates them and writes them back out.
#[derive(Parser, Debug)]
#[command(name = "cmx-edl")]
#[command(version)]
#[command(about = "Parse, inspect and round-trip CMX Edit Decision Lists")]
#[command(long_about = "cmx-edl parses CMX3600 style Edit Decision Lists.

EXAMPLES:
    cmx-edl check show.edl                  # Parse and report statement counts
    cmx-edl check /projects/edls/           # Check every .edl file in a folder
    cmx-edl --fps 29.97 info show.edl       # Record span at 29.97 fps
    cmx-edl print show.edl -o clean.edl     # Write the canonical form
    cmx-edl completions bash > cmx-edl.bash # Generate bash completions

CONFIGURATION:
    Configuration is stored in edl.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Framerate to read EDLs at (23.98, 24, 25, 29.97, 30, 50, 59.94, 60)
    #[arg(long, global = true)]
    fps: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "edl.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
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

    // @initializes: Global logger, filtering is left to the max level
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for log level
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
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "cmx-edl", &mut std::io::stdout());
        return Ok(());
    }

    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &cli.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(config_log_level.to_level_filter());
    }

    let mut config = Config::load_or_create(&cli.config_path)?;
    if let Some(fps) = &cli.fps {
        config.framerate = serde_json::Value::String(fps.clone());
    }
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if cli.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let framerate = config.framerate()?;
    debug!("Reading EDLs at {} fps", framerate);

    match cli.command {
        Commands::Check { input_path } => run_check(&input_path, framerate, &config.extension),
        Commands::Print {
            input_path,
            output,
            force_overwrite,
        } => run_print(&input_path, framerate, output.as_deref(), force_overwrite),
        Commands::Info { input_path } => run_info(&input_path, framerate),
        Commands::Completions { .. } => Ok(()),
    }
}

fn load(path: &Path, framerate: Framerate) -> Result<Edl> {
    if !FileManager::file_exists(path) {
        return Err(anyhow!("Input file does not exist: {:?}", path));
    }
    Edl::from_file(framerate.label(), path).with_context(|| format!("Failed to parse EDL: {}", path.display()))
}

// Parse a single file or every matching file under a folder
fn run_check(input_path: &Path, framerate: Framerate, extension: &str) -> Result<()> {
    let files = if input_path.is_file() {
        vec![input_path.to_path_buf()]
    } else if FileManager::dir_exists(input_path) {
        FileManager::find_files(input_path, extension)?
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", input_path));
    };

    let mut failed = 0;
    for file in &files {
        match load(file, framerate) {
            Ok(edl) => println!(
                "OK   {} ({} statements, {} events)",
                file.display(),
                edl.len(),
                edl.event_count()
            ),
            Err(e) => {
                failed += 1;
                error!("{:#}", e);
                println!("FAIL {}", file.display());
            }
        }
    }

    info!("Checked {} files, {} failed", files.len(), failed);

    if failed > 0 {
        return Err(anyhow!("{} of {} EDL files failed to parse", failed, files.len()));
    }
    Ok(())
}

fn run_print(input_path: &Path, framerate: Framerate, output: Option<&Path>, force_overwrite: bool) -> Result<()> {
    let edl = load(input_path, framerate)?;
    let text = format!("{}\n", edl);

    match output {
        Some(output) => {
            if output.exists() && !force_overwrite {
                return Err(anyhow!("Output file already exists: {:?}. Use -f to force overwrite.", output));
            }
            FileManager::write_to_file(output, &text)?;
            info!("Success: {:?}", output);
        }
        None => print!("{}", text),
    }
    Ok(())
}

fn run_info(input_path: &Path, framerate: Framerate) -> Result<()> {
    let edl = load(input_path, framerate)?;

    let standard = if edl.is_pal() { "PAL" } else { "NTSC" };
    println!("File:       {}", input_path.display());
    println!("Title:      {}", edl.title());
    println!(
        "Framerate:  {} ({}, drop {} / non-drop {})",
        edl.framerate(),
        standard,
        edl.drop_frame_rate(),
        edl.non_drop_frame_rate()
    );
    println!("Statements: {}", edl.len());
    println!("Events:     {}", edl.event_count());

    match (edl.get_start(), edl.get_end()) {
        (Some(start), Some(end)) => {
            println!("Start:      {}", start);
            println!("End:        {}", end);
            println!("Length:     {} frames", edl.get_length());
        }
        _ => println!("Length:     0 frames (no events)"),
    }

    let transitions = edl.events().filter(|e| e.has_transition()).count();
    let timewarps = edl.events().filter(|e| e.has_timewarp()).count();
    println!("Transitions: {}, timewarps: {}", transitions, timewarps);

    Ok(())
}
