//! `radar` binary: config loading, logging setup, signal handling, and
//! command dispatch.

mod cli;
mod error_fmt;
mod hud;
mod run;

use clap::Parser;
use cli::{Cli, Commands, FILE_GUARD, JSON_MODE};
use eyre::WrapErr;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() {
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);
    if let Err(err) = try_main(&cli) {
        if JSON_MODE.get().copied().unwrap_or(false) {
            eprintln!("{}", error_fmt::format_error_json(&err));
        } else {
            eprintln!("{}", error_fmt::humanize(&err));
        }
        std::process::exit(1);
    }
}

fn try_main(cli: &Cli) -> eyre::Result<()> {
    color_eyre::install()?;

    let cfg = load_config(&cli.config)?;
    cfg.validate().wrap_err("invalid configuration")?;
    init_tracing(cli, &cfg.logging)?;

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let flag = shutdown.clone();
        ctrlc::set_handler(move || {
            tracing::info!("shutdown requested");
            flag.store(true, Ordering::Relaxed);
        })
        .wrap_err("installing Ctrl-C handler")?;
    }

    match &cli.cmd {
        Commands::Run {
            device,
            baud,
            simulate,
            no_audio,
            ticks,
        } => run::run(
            &cfg,
            run::RunOpts {
                device: device.clone(),
                baud: *baud,
                simulate: *simulate,
                no_audio: *no_audio,
                ticks: *ticks,
            },
            shutdown,
        ),
        Commands::SelfCheck => run::self_check(&cfg),
    }
}

/// Load the TOML config. A missing file at the default location is fine
/// (built-in defaults apply); an explicitly named file must exist.
fn load_config(path: &Path) -> eyre::Result<radar_config::Config> {
    if !path.exists() {
        return Ok(radar_config::Config::default());
    }
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("reading config {}", path.display()))?;
    radar_config::load_toml(&text).wrap_err_with(|| format!("parsing config {}", path.display()))
}

fn init_tracing(cli: &Cli, logging: &radar_config::Logging) -> eyre::Result<()> {
    let level = logging.level.as_deref().unwrap_or(&cli.log_level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .wrap_err_with(|| format!("invalid log level {level:?}"))?;

    let registry = tracing_subscriber::registry().with(filter);

    let file_layer = match &logging.file {
        Some(file) => {
            let path = Path::new(file);
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "radar.log".to_string());
            let dir = dir.unwrap_or_else(|| Path::new("."));
            let appender = match logging.rotation.as_deref() {
                Some("daily") => tracing_appender::rolling::daily(dir, &name),
                Some("hourly") => tracing_appender::rolling::hourly(dir, &name),
                _ => tracing_appender::rolling::never(dir, &name),
            };
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = FILE_GUARD.set(guard);
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_ansi(false),
            )
        }
        None => None,
    };

    let stdout_layer = if cli.json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().with_target(false).boxed()
    };
    registry.with(stdout_layer).with(file_layer).init();
    Ok(())
}
