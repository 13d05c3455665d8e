//! Collaborators the detection loop drives
//!
//! The browser implementations live in `bridge`; tests supply fakes.

use std::future::Future;

use crate::error::DetectorError;
use crate::gesture::Observation;

/// Source of video frames
pub trait CaptureSource {
    type Frame;

    /// Current frame, or `None` while the source is not ready yet
    fn frame(&self) -> Option<Self::Frame>;
}

/// Loaded hand-pose model
pub trait HandDetector<F> {
    /// Zero or more hands found in `frame`
    fn estimate(&self, frame: &F) -> impl Future<Output = Result<Vec<Observation>, DetectorError>>;
}

/// Landmark overlay drawing. Fire and forget.
pub trait LandmarkRenderer {
    fn draw(&self, hands: &[Observation]);
}
