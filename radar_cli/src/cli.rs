//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "radar", version, about = "Serial radar display CLI")]
pub struct Cli {
    /// Path to config TOML (typed)
    #[arg(long, value_name = "FILE", default_value = "etc/radar_config.toml")]
    pub config: PathBuf,

    /// Log as JSON lines instead of pretty
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the radar display against a sensor or the built-in simulator
    Run {
        /// Serial device path (overrides config; requires the `hardware` feature)
        #[arg(long, value_name = "DEV")]
        device: Option<String>,
        /// Baud rate (overrides config)
        #[arg(long, value_name = "BAUD")]
        baud: Option<u32>,
        /// Use the built-in sweep simulator instead of a serial device
        #[arg(long, action = ArgAction::SetTrue)]
        simulate: bool,
        /// Disable audible alerts for this run
        #[arg(long, action = ArgAction::SetTrue)]
        no_audio: bool,
        /// Stop after this many ticks (default: run until Ctrl-C)
        #[arg(long, value_name = "N")]
        ticks: Option<u64>,
    },
    /// Quick health check (config parses, pipeline assembles, sim ok)
    SelfCheck,
}
