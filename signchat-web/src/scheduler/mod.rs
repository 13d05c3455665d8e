//! Scheduler module - periodic detection cycles
//!
//! Re-exports only. All logic in submodules.

mod detection_loop;
mod metrics;
mod ports;

pub use detection_loop::{CycleOutcome, DetectionLoop, LoopState};
pub use metrics::CycleStats;
pub use ports::{CaptureSource, HandDetector, LandmarkRenderer};
