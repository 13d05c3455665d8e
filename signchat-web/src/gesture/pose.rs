//! Finger curl and direction derivation
//!
//! Turns an observation into the discrete features the sign rules test:
//! one curl state per finger and one pointing direction per finger.

use nalgebra::Vector3;

use super::landmarks::{Finger, Observation};

/// Segments shorter than this are treated as collapsed
const MIN_SEGMENT: f32 = 1e-4;

/// Total flexion (degrees) below which a finger counts as straight
const FINGER_NO_CURL_LIMIT: f32 = 60.0;
/// Total flexion (degrees) below which a finger counts as half curled
const FINGER_HALF_CURL_LIMIT: f32 = 150.0;
const THUMB_NO_CURL_LIMIT: f32 = 45.0;
const THUMB_HALF_CURL_LIMIT: f32 = 120.0;

const PARALLEL_LIMIT: f32 = 20.0;
const SPREAD_LIMIT: f32 = 55.0;
const PERPENDICULAR_LIMIT: f32 = 125.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FingerCurl {
    NoCurl,
    HalfCurl,
    FullCurl,
}

impl FingerCurl {
    pub fn as_str(&self) -> &'static str {
        match self {
            FingerCurl::NoCurl => "no-curl",
            FingerCurl::HalfCurl => "half-curl",
            FingerCurl::FullCurl => "full-curl",
        }
    }
}

/// How two finger directions relate, bucketed by the angle between them
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Relationship {
    /// Under 20°
    Parallel,
    /// 20° to 55°
    Spread,
    /// 55° to 125°
    Perpendicular,
    /// 125° and over
    Opposed,
}

impl Relationship {
    pub fn from_angle(degrees: f32) -> Self {
        if degrees < PARALLEL_LIMIT {
            Relationship::Parallel
        } else if degrees < SPREAD_LIMIT {
            Relationship::Spread
        } else if degrees < PERPENDICULAR_LIMIT {
            Relationship::Perpendicular
        } else {
            Relationship::Opposed
        }
    }
}

/// Flexion at `joint` in degrees (0 = straight)
fn joint_flexion(parent: Vector3<f32>, joint: Vector3<f32>, child: Vector3<f32>) -> f32 {
    let incoming = joint - parent;
    let outgoing = child - joint;

    if incoming.norm() < MIN_SEGMENT || outgoing.norm() < MIN_SEGMENT {
        return 0.0;
    }

    incoming.angle(&outgoing).to_degrees()
}

/// Summed flexion over the three interior joints of a finger
pub fn finger_flexion(observation: &Observation, finger: Finger) -> f32 {
    let chain = finger.chain().map(|idx| observation.point(idx));
    chain
        .windows(3)
        .map(|w| joint_flexion(w[0], w[1], w[2]))
        .sum()
}

pub fn classify_curl(finger: Finger, flexion: f32) -> FingerCurl {
    let (no_curl, half_curl) = match finger {
        Finger::Thumb => (THUMB_NO_CURL_LIMIT, THUMB_HALF_CURL_LIMIT),
        _ => (FINGER_NO_CURL_LIMIT, FINGER_HALF_CURL_LIMIT),
    };

    if flexion < no_curl {
        FingerCurl::NoCurl
    } else if flexion < half_curl {
        FingerCurl::HalfCurl
    } else {
        FingerCurl::FullCurl
    }
}

/// Unit vector from the finger's base joint to its tip
pub fn finger_direction(observation: &Observation, finger: Finger) -> Option<Vector3<f32>> {
    let chain = finger.chain();
    let span = observation.point(chain[4]) - observation.point(chain[1]);
    span.try_normalize(MIN_SEGMENT)
}

/// Per-finger features derived from one observation
#[derive(Clone, Debug, PartialEq)]
pub struct HandPose {
    curls: [FingerCurl; 5],
    directions: [Option<Vector3<f32>>; 5],
}

impl HandPose {
    pub fn from_observation(observation: &Observation) -> Self {
        Self {
            curls: Finger::ALL.map(|f| classify_curl(f, finger_flexion(observation, f))),
            directions: Finger::ALL.map(|f| finger_direction(observation, f)),
        }
    }

    pub fn curl(&self, finger: Finger) -> FingerCurl {
        self.curls[finger.index()]
    }

    pub fn direction(&self, finger: Finger) -> Option<Vector3<f32>> {
        self.directions[finger.index()]
    }

    /// `"thumb:full-curl index:no-curl ..."` for logs
    pub fn curl_summary(&self) -> String {
        Finger::ALL
            .iter()
            .map(|&f| format!("{}:{}", f.as_str(), self.curl(f).as_str()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// `None` when either finger has collapsed to a point
    pub fn relationship(&self, a: Finger, b: Finger) -> Option<Relationship> {
        let da = self.direction(a)?;
        let db = self.direction(b)?;
        Some(Relationship::from_angle(da.angle(&db).to_degrees()))
    }
}
