//! Per-loop cycle statistics for the debug overlay

/// Weight of the newest latency sample in the moving average
const LATENCY_SMOOTHING: f32 = 0.1;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CycleStats {
    /// Cycles that reached the detector
    pub cycles: u32,
    /// Ticks dropped because the previous cycle was still waiting
    pub skipped: u32,
    /// Ticks with no frame (camera off or video not ready)
    pub not_ready: u32,
    pub failures: u32,
    pub detections: u32,
    /// Exponential moving average of detector latency
    pub detector_latency_ms: f32,
    /// Samples folded into `detector_latency_ms`
    pub latency_samples: u32,
}

impl CycleStats {
    pub fn record_latency(&mut self, ms: f32) {
        // Sanity check: ignore clock glitches
        if !ms.is_finite() || ms < 0.0 {
            return;
        }

        self.detector_latency_ms = if self.latency_samples == 0 {
            ms
        } else {
            self.detector_latency_ms * (1.0 - LATENCY_SMOOTHING) + ms * LATENCY_SMOOTHING
        };
        self.latency_samples += 1;
    }

    pub fn overlay_text(&self) -> String {
        format!(
            "Cycles: {} | Skipped: {} | Not ready: {}\n\
             Detected: {} | Failed: {}\n\
             Model: {:.0}ms",
            self.cycles,
            self.skipped,
            self.not_ready,
            self.detections,
            self.failures,
            self.detector_latency_ms,
        )
    }
}
