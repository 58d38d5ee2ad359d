//! Plain-text HUD: one status line overwritten in place, with threat log
//! lines appended as they happen.

use radar_core::pipeline::RadarSnapshot;
use radar_core::types::ThreatTier;
use std::io::Write;

pub struct TextHud {
    /// How many threat events have been printed, matched against the
    /// snapshot's running total. Timestamps cannot dedup here: a burst
    /// drained in one tick shares a single timestamp.
    printed_total: u64,
    last_stats: (u64, u64, u64),
}

/// How many of the snapshot's threat rows are new since `printed` events
/// were shown, bounded by the window actually carried in the snapshot.
fn pending_rows(printed: u64, total: u64, window: usize) -> usize {
    usize::try_from(total.saturating_sub(printed))
        .unwrap_or(usize::MAX)
        .min(window)
}

impl TextHud {
    pub fn new() -> Self {
        Self {
            printed_total: 0,
            last_stats: (0, 0, 0),
        }
    }

    fn tier_label(tier: ThreatTier) -> &'static str {
        match tier {
            ThreatTier::Normal => "NORMAL",
            ThreatTier::Warning => "WARNING",
            ThreatTier::Critical => "CRITICAL",
        }
    }

    pub fn render(&mut self, snap: &RadarSnapshot<'_>) {
        let mut out = std::io::stdout().lock();

        // New threat log entries get their own scrolling lines.
        let n = pending_rows(
            self.printed_total,
            snap.threats_total,
            snap.recent_threats.len(),
        );
        for e in &snap.recent_threats[snap.recent_threats.len() - n..] {
            let _ = writeln!(
                out,
                "\r[{}] bearing {:>5.1} deg  distance {:>5.1}",
                Self::tier_label(e.tier),
                e.angle,
                e.distance,
            );
        }
        self.printed_total = snap.threats_total;

        let link = if snap.connected { "link ok" } else { "LINK DOWN" };
        let s = &snap.state;
        let _ = write!(
            out,
            "\r{:<8} bearing {:>5.1} deg  raw {:>5.1}  smoothed {:>5.1}  trail {:>3}  tick {:>6}  pkts {:>6}  bad {:>4}  {}  ",
            Self::tier_label(s.tier),
            s.angle,
            s.raw_distance,
            s.smoothed_distance,
            snap.trail.len(),
            snap.ticks,
            snap.metrics.packets,
            snap.metrics.parse_errors,
            link,
        );
        let _ = out.flush();
        self.last_stats = (snap.ticks, snap.metrics.packets, snap.metrics.parse_errors);
    }

    pub fn finish(&mut self) {
        let (ticks, packets, bad) = self.last_stats;
        let mut out = std::io::stdout().lock();
        let _ = writeln!(
            out,
            "\nstopped after {ticks} ticks: {packets} packets, {bad} malformed lines"
        );
    }
}

impl Default for TextHud {
    fn default() -> Self {
        Self::new()
    }
}
