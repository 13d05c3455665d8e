//! Gesture module - rule-based fingerspelling recognition
//!
//! Re-exports only. All logic in submodules.

mod descriptor;
mod landmarks;
mod library;
mod pose;
mod selector;

#[cfg(test)]
pub(crate) mod test_hands;

pub use descriptor::{Rule, SignDescriptor};
pub use landmarks::{Finger, HandLandmark, Observation, LANDMARK_COUNT};
pub use library::GestureLibrary;
pub use pose::{FingerCurl, HandPose, Relationship};
pub use selector::{score, scores, select, DetectedGesture, GestureScore, CONFIDENCE_THRESHOLD};
