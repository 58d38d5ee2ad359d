//! Command execution: config mapping, collaborator assembly, run loop.

use crate::hud::TextHud;
use radar_core::pipeline::{self, RunParams};
use radar_hardware::{ConsoleAudio, SimulatedSource};
use radar_traits::ByteSource;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

pub struct RunOpts {
    pub device: Option<String>,
    pub baud: Option<u32>,
    pub simulate: bool,
    pub no_audio: bool,
    pub ticks: Option<u64>,
}

fn params_from(cfg: &radar_config::Config, opts: &RunOpts) -> RunParams {
    RunParams {
        zones: (&cfg.zones).into(),
        filter: (&cfg.filter).into(),
        trail: (&cfg.trail).into(),
        tick: (&cfg.tick).into(),
        audio_enabled: cfg.audio.enabled && !opts.no_audio,
        max_ticks: opts.ticks,
    }
}

fn make_source(cfg: &radar_config::Config, opts: &RunOpts) -> eyre::Result<Box<dyn ByteSource + Send>> {
    if opts.simulate {
        tracing::info!("using built-in sweep simulator");
        return Ok(Box::new(SimulatedSource::new()));
    }
    #[cfg(feature = "hardware")]
    {
        use eyre::WrapErr;
        let device = opts
            .device
            .clone()
            .unwrap_or_else(|| cfg.serial.device_or_default());
        let baud = opts.baud.unwrap_or(cfg.serial.baud);
        let timeout = std::time::Duration::from_millis(cfg.tick.read_timeout_ms);
        let source = radar_hardware::SerialSource::open(&device, baud, timeout)
            .wrap_err_with(|| format!("opening serial device {device}"))?;
        Ok(Box::new(source))
    }
    #[cfg(not(feature = "hardware"))]
    {
        if opts.device.is_some() || opts.baud.is_some() {
            tracing::warn!(
                "built without the `hardware` feature; --device/--baud ignored, using simulator"
            );
        } else {
            tracing::info!("no serial backend compiled in, using simulator");
        }
        let _ = cfg;
        Ok(Box::new(SimulatedSource::new()))
    }
}

pub fn run(
    cfg: &radar_config::Config,
    opts: RunOpts,
    shutdown: Arc<AtomicBool>,
) -> eyre::Result<()> {
    let params = params_from(cfg, &opts);
    let source = make_source(cfg, &opts)?;
    let mut hud = TextHud::new();
    pipeline::run(source, ConsoleAudio, params, &shutdown, |snap| {
        hud.render(snap);
    })?;
    hud.finish();
    Ok(())
}

/// Assemble the whole stack against the simulator and tick it a handful of
/// times. Catches broken configs and assembly regressions without hardware.
pub fn self_check(cfg: &radar_config::Config) -> eyre::Result<()> {
    let params = RunParams {
        zones: (&cfg.zones).into(),
        filter: (&cfg.filter).into(),
        trail: (&cfg.trail).into(),
        tick: (&cfg.tick).into(),
        audio_enabled: false,
        max_ticks: Some(10),
    };
    let shutdown = AtomicBool::new(false);
    let mut frames = 0u64;
    pipeline::run(
        SimulatedSource::new(),
        ConsoleAudio,
        params,
        &shutdown,
        |_| frames += 1,
    )?;
    if frames == 0 {
        eyre::bail!("self-check produced no frames");
    }
    println!("self-check: ok ({frames} frames)");
    Ok(())
}
