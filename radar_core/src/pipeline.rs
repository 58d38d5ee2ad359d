//! Tick-driven pipeline tying ingestion, smoothing, trail, log, and alerts
//! together, plus the blocking run loop used by the CLI.
//!
//! Per tick: drain every pending ingest event in arrival order, fold each
//! sample through the engine and side stores, then apply exactly one trail
//! decay step. Sample arrival and trail fade are deliberately on separate
//! clocks; a burst of samples never accelerates fading.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use radar_traits::clock::{Clock, MonotonicClock};
use radar_traits::{AudioSink, ByteSource};

use crate::alert::AlertScheduler;
use crate::config::{FilterCfg, TickCfg, TrailCfg, ZoneCfg};
use crate::engine::SmoothingEngine;
use crate::error::{FramingError, Result};
use crate::ingest::{IngestEvent, IngestMetrics, SampleIngestor};
use crate::threat_log::ThreatLog;
use crate::trail::TrailBuffer;
use crate::types::{Beep, RawSample, SmoothedState, ThreatEvent};

/// How many threat log entries a snapshot carries for the HUD.
const HUD_THREAT_ROWS: usize = 5;

/// Source considered stale after this long without a sample.
const STALE_AFTER_MS: u64 = 2_000;

pub struct RadarPipeline {
    engine: SmoothingEngine,
    trail: TrailBuffer,
    log: ThreatLog,
    alerts: AlertScheduler,
    connected: bool,
    ticks: u64,
    metrics: IngestMetrics,
}

/// Outcome of one `tick`, for callers that drive audio or diagnostics.
#[derive(Debug, Default)]
pub struct TickReport {
    /// Samples folded in this tick.
    pub samples: usize,
    /// Beeps the scheduler released this tick, in sample order.
    pub beeps: Vec<Beep>,
    /// Set when the source died during this tick.
    pub source_error: Option<FramingError>,
}

/// Read-only view of the pipeline for a presenter. Valid for one frame.
pub struct RadarSnapshot<'a> {
    pub state: SmoothedState,
    pub trail: &'a TrailBuffer,
    /// Most recent threat events, oldest first.
    pub recent_threats: Vec<ThreatEvent>,
    /// Threat events ever logged; a stable cursor across snapshots even
    /// when a burst shares one tick timestamp.
    pub threats_total: u64,
    /// False once the source has failed or gone stale.
    pub connected: bool,
    pub metrics: IngestMetrics,
    pub ticks: u64,
}

impl RadarPipeline {
    pub fn new(zones: ZoneCfg, filter: FilterCfg, trail: TrailCfg) -> Result<Self> {
        let engine = SmoothingEngine::new(filter, zones)?;
        Ok(Self {
            trail: TrailBuffer::new(trail, zones.max_distance),
            engine,
            log: ThreatLog::default(),
            alerts: AlertScheduler::new(zones),
            connected: true,
            ticks: 0,
            metrics: IngestMetrics::default(),
        })
    }

    /// Fold one sample through every stage. Returns the beep if the alert
    /// scheduler released one.
    pub fn apply_sample(&mut self, sample: &RawSample, now: Instant) -> Option<Beep> {
        let state = self.engine.ingest(sample);
        self.trail.record(&state);
        self.log.record_if_notable(&state, now);
        self.alerts.maybe_fire(&state, now)
    }

    /// One pipeline tick: drain pending events, then fade the trail once.
    pub fn tick(&mut self, ingestor: &SampleIngestor, now: Instant) -> TickReport {
        let mut report = TickReport::default();
        for event in ingestor.drain() {
            match event {
                IngestEvent::Sample(sample) => {
                    report.samples += 1;
                    if let Some(beep) = self.apply_sample(&sample, now) {
                        report.beeps.push(beep);
                    }
                }
                IngestEvent::SourceError(err) => {
                    self.connected = false;
                    report.source_error = Some(err);
                }
            }
        }
        self.trail.decay_tick();
        self.ticks += 1;
        self.metrics = ingestor.metrics();
        if self.connected
            && let Some(age) = ingestor.last_sample_age_ms()
            && age > STALE_AFTER_MS
        {
            tracing::warn!(age_ms = age, "no samples recently, marking source stale");
            self.connected = false;
        }
        report
    }

    pub fn snapshot(&self) -> RadarSnapshot<'_> {
        RadarSnapshot {
            state: self.engine.state(),
            trail: &self.trail,
            recent_threats: self.log.recent(HUD_THREAT_ROWS).copied().collect(),
            threats_total: self.log.total_recorded(),
            connected: self.connected,
            metrics: self.metrics,
            ticks: self.ticks,
        }
    }

    pub fn threat_log(&self) -> &ThreatLog {
        &self.log
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }
}

/// Everything `run` needs beyond the source and sink.
#[derive(Debug, Clone, Copy)]
pub struct RunParams {
    pub zones: ZoneCfg,
    pub filter: FilterCfg,
    pub trail: TrailCfg,
    pub tick: TickCfg,
    pub audio_enabled: bool,
    /// Stop after this many ticks; `None` runs until `shutdown` is raised.
    pub max_ticks: Option<u64>,
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            zones: ZoneCfg::default(),
            filter: FilterCfg::default(),
            trail: TrailCfg::default(),
            tick: TickCfg::default(),
            audio_enabled: true,
            max_ticks: None,
        }
    }
}

/// Blocking run loop: spawn the ingest worker, then tick at the configured
/// period until `shutdown` is raised (or `max_ticks` elapses), presenting a
/// snapshot every tick. A dead source degrades to rendering the last known
/// state; it does not abort the loop.
pub fn run<S, A, F>(
    source: S,
    mut audio: A,
    params: RunParams,
    shutdown: &AtomicBool,
    mut present: F,
) -> Result<()>
where
    S: ByteSource + Send + 'static,
    A: AudioSink,
    F: FnMut(&RadarSnapshot<'_>),
{
    let mut pipeline = RadarPipeline::new(params.zones, params.filter, params.trail)?;
    let clock = MonotonicClock;
    let period = Duration::from_millis(params.tick.period_ms);
    let read_timeout = Duration::from_millis(params.tick.read_timeout_ms);
    let mut ingestor = SampleIngestor::spawn(source, read_timeout, MonotonicClock);

    tracing::info!(
        period_ms = params.tick.period_ms,
        audio = params.audio_enabled,
        "pipeline running"
    );

    while !shutdown.load(Ordering::Relaxed) {
        if let Some(max) = params.max_ticks
            && pipeline.ticks >= max
        {
            break;
        }
        let tick_start = clock.now();
        let report = pipeline.tick(&ingestor, tick_start);
        if let Some(err) = &report.source_error {
            tracing::error!(error = %err, "sample source failed");
        }
        if params.audio_enabled {
            for beep in &report.beeps {
                audio.beep(beep.frequency_hz, beep.duration_ms);
            }
        }
        present(&pipeline.snapshot());

        let elapsed = clock.now().saturating_duration_since(tick_start);
        if let Some(remaining) = period.checked_sub(elapsed) {
            clock.sleep(remaining);
        }
    }

    ingestor.stop();
    tracing::info!(ticks = pipeline.ticks, "pipeline stopped");
    Ok(())
}
