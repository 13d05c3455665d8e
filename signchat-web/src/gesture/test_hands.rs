//! Synthetic hands for tests
//!
//! Every finger starts at the wrist, runs out along its heading (degrees
//! clockwise from +y in the palm plane) and bends toward -z by the same
//! angle at each of its three interior joints.

use nalgebra::Vector3;

use super::landmarks::{Finger, HandLandmark, Observation, LANDMARK_COUNT, WRIST};
use super::pose::FingerCurl;

const PALM_LENGTH: f32 = 80.0;
const SEGMENT_LENGTH: f32 = 30.0;

/// Per-joint bend used for each curl state
pub fn joint_bend(curl: FingerCurl) -> f32 {
    match curl {
        FingerCurl::NoCurl => 0.0,
        FingerCurl::HalfCurl => 35.0,
        FingerCurl::FullCurl => 65.0,
    }
}

#[derive(Clone)]
pub struct HandBuilder {
    wrist: Vector3<f32>,
    fingers: [(FingerCurl, f32); 5],
}

impl HandBuilder {
    pub fn new() -> Self {
        Self {
            wrist: Vector3::new(320.0, 400.0, 0.0),
            fingers: [(FingerCurl::NoCurl, 0.0); 5],
        }
    }

    pub fn wrist_at(mut self, x: f32, y: f32) -> Self {
        self.wrist = Vector3::new(x, y, 0.0);
        self
    }

    pub fn finger(mut self, finger: Finger, curl: FingerCurl, heading_deg: f32) -> Self {
        self.fingers[finger.index()] = (curl, heading_deg);
        self
    }

    pub fn build(&self) -> Observation {
        let mut landmarks = [HandLandmark::default(); LANDMARK_COUNT];
        landmarks[WRIST] = to_landmark(self.wrist);

        for finger in Finger::ALL {
            let (curl, heading_deg) = self.fingers[finger.index()];
            let heading = heading_deg.to_radians();
            let forward = Vector3::new(heading.sin(), heading.cos(), 0.0);
            let into_palm = Vector3::new(0.0, 0.0, -1.0);
            let bend = joint_bend(curl).to_radians();

            let chain = finger.chain();
            let mut joint = self.wrist + forward * PALM_LENGTH;
            landmarks[chain[1]] = to_landmark(joint);

            for (k, &idx) in chain[2..].iter().enumerate() {
                let turn = bend * (k + 1) as f32;
                let dir = forward * turn.cos() + into_palm * turn.sin();
                joint += dir * SEGMENT_LENGTH;
                landmarks[idx] = to_landmark(joint);
            }
        }

        Observation::new(landmarks).unwrap()
    }

    /// Every keypoint at the same spot
    pub fn collapsed() -> Observation {
        Observation::new([HandLandmark::new(100.0, 100.0, 0.0); LANDMARK_COUNT]).unwrap()
    }
}

fn to_landmark(v: Vector3<f32>) -> HandLandmark {
    HandLandmark::new(v.x, v.y, v.z)
}
