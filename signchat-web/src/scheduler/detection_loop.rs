//! Detection loop: capture → detect → score → select → apply
//!
//! The loop itself is timer-agnostic. Whoever owns the periodic timer calls
//! [`DetectionLoop::run_cycle`] on every tick (the browser bridge uses
//! `setInterval`). Cycles are serialized: a tick that arrives while the
//! previous detector call is still pending is skipped.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, info, warn};

use crate::error::DetectorError;
use crate::gesture::{select, DetectedGesture, GestureLibrary, HandPose, CONFIDENCE_THRESHOLD};
use crate::session::SessionState;

use super::metrics::CycleStats;
use super::ports::{CaptureSource, HandDetector, LandmarkRenderer};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
}

/// What one tick did
#[derive(Clone, Debug, PartialEq)]
pub enum CycleOutcome {
    /// Loop is not running
    Idle,
    /// Previous cycle still waiting on the detector
    Skipped,
    /// No frame available (video not ready or camera off)
    CaptureNotReady,
    /// Detector saw no hands
    NoHand,
    /// Primary hand scored below the threshold for every letter
    NoGesture,
    Detected(DetectedGesture),
    /// Detector call failed; the next tick proceeds normally
    Failed(DetectorError),
    /// Loop was torn down while the detector was working
    Discarded,
}

/// Clears the in-flight flag even if the cycle future is dropped mid-await
struct InFlight<'a>(&'a Cell<bool>);

impl<'a> InFlight<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

fn no_clock() -> f64 {
    0.0
}

pub struct DetectionLoop<D, C, R> {
    detector: D,
    capture: C,
    renderer: R,
    library: GestureLibrary,
    threshold: f32,
    session: Rc<RefCell<SessionState>>,
    state: Cell<LoopState>,
    /// Bumped on every start/dispose so stale cycles can tell they are stale
    generation: Cell<u64>,
    in_flight: Cell<bool>,
    stats: RefCell<CycleStats>,
    clock: fn() -> f64,
}

impl<D, C, R> DetectionLoop<D, C, R>
where
    C: CaptureSource,
    D: HandDetector<C::Frame>,
    R: LandmarkRenderer,
{
    /// Build an idle loop around an already loaded detector
    pub fn new(detector: D, capture: C, renderer: R, session: Rc<RefCell<SessionState>>) -> Self {
        Self {
            detector,
            capture,
            renderer,
            library: GestureLibrary::alphabet(),
            threshold: CONFIDENCE_THRESHOLD,
            session,
            state: Cell::new(LoopState::Idle),
            generation: Cell::new(0),
            in_flight: Cell::new(false),
            stats: RefCell::new(CycleStats::default()),
            clock: no_clock,
        }
    }

    pub fn with_library(mut self, library: GestureLibrary) -> Self {
        self.library = library;
        self
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Millisecond clock used for latency stats
    pub fn with_clock(mut self, clock: fn() -> f64) -> Self {
        self.clock = clock;
        self
    }

    pub fn state(&self) -> LoopState {
        self.state.get()
    }

    pub fn stats(&self) -> CycleStats {
        self.stats.borrow().clone()
    }

    pub fn start(&self) {
        if self.state.get() == LoopState::Running {
            return;
        }
        self.generation.set(self.generation.get() + 1);
        self.state.set(LoopState::Running);
        info!("detection loop running");
    }

    /// Stop the loop. A detector call still in flight is allowed to finish
    /// but its result is thrown away.
    pub fn dispose(&self) {
        if self.state.get() == LoopState::Idle {
            return;
        }
        self.generation.set(self.generation.get() + 1);
        self.state.set(LoopState::Idle);
        info!("detection loop stopped");
    }

    /// Run one detection cycle
    pub async fn run_cycle(&self) -> CycleOutcome {
        if self.state.get() != LoopState::Running {
            return CycleOutcome::Idle;
        }

        if self.in_flight.get() {
            self.stats.borrow_mut().skipped += 1;
            debug!("tick skipped: previous cycle still waiting on the detector");
            return CycleOutcome::Skipped;
        }

        let camera_on = self.session.borrow().camera_enabled();
        let frame = match self.capture.frame() {
            Some(frame) if camera_on => frame,
            _ => {
                self.stats.borrow_mut().not_ready += 1;
                return CycleOutcome::CaptureNotReady;
            }
        };

        let generation = self.generation.get();
        self.stats.borrow_mut().cycles += 1;
        let started = (self.clock)();

        let result = {
            let _in_flight = InFlight::enter(&self.in_flight);
            self.detector.estimate(&frame).await
        };

        if self.generation.get() != generation {
            debug!("discarding detector result from a stopped loop");
            return CycleOutcome::Discarded;
        }

        let elapsed = ((self.clock)() - started) as f32;
        self.stats.borrow_mut().record_latency(elapsed);

        let hands = match result {
            Ok(hands) => hands,
            Err(err) => {
                warn!("detection cycle failed: {}", err);
                self.stats.borrow_mut().failures += 1;
                return CycleOutcome::Failed(err);
            }
        };

        // Only the first hand is classified; every hand is drawn.
        let outcome = match hands.first() {
            None => CycleOutcome::NoHand,
            Some(primary) => match select(primary, &self.library, self.threshold) {
                Some(gesture) => {
                    debug!(
                        "detected {} ({:.2}) [{}]",
                        gesture.name,
                        gesture.confidence,
                        HandPose::from_observation(primary).curl_summary()
                    );
                    self.session.borrow_mut().apply_detection(gesture);
                    self.stats.borrow_mut().detections += 1;
                    CycleOutcome::Detected(gesture)
                }
                None => CycleOutcome::NoGesture,
            },
        };

        self.renderer.draw(&hands);
        outcome
    }
}
