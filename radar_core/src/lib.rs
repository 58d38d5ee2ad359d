#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Real-time radar pipeline core (hardware-agnostic).
//!
//! Consumes `"<angle>,<distance>"` lines from a rotating ranging sensor and
//! drives a radar display with audible proximity alerts. All hardware
//! interactions go through `radar_traits::ByteSource` and
//! `radar_traits::AudioSink`.
//!
//! ## Architecture
//!
//! - **Framing**: line reassembly over a byte stream (`framer` module)
//! - **Ingestion**: background worker thread owning the source (`ingest`)
//! - **Smoothing**: EMA filter, range clamp, threat classification (`engine`)
//! - **Trail**: fixed-capacity fading detection ring (`trail`)
//! - **Alerts**: cooldown-gated beep scheduling (`alert`)
//! - **Threat log**: bounded ring of notable detections (`threat_log`)
//! - **Pipeline**: per-tick orchestration and snapshots (`pipeline`)
//!
//! The worker thread and the pipeline tick are the only two execution
//! contexts; a bounded channel is the single shared resource between them.

pub mod alert;
pub mod config;
pub mod conversions;
pub mod engine;
pub mod error;
pub mod framer;
pub mod ingest;
pub mod mocks;
pub mod pipeline;
pub mod threat_log;
pub mod trail;
pub mod types;
pub mod util;

pub use alert::AlertScheduler;
pub use config::{FilterCfg, TickCfg, TrailCfg, ZoneCfg};
pub use engine::SmoothingEngine;
pub use framer::LineFramer;
pub use ingest::{IngestEvent, IngestMetrics, SampleIngestor};
pub use pipeline::{RadarPipeline, RadarSnapshot, RunParams, TickReport};
pub use threat_log::ThreatLog;
pub use trail::TrailBuffer;
pub use types::{Beep, RawSample, SmoothedState, ThreatEvent, ThreatTier, TrailPoint};
