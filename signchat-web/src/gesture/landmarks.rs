//! Hand landmark observation
//!
//! One observation is the 21 keypoints the hand-pose model reports for a
//! single hand. Points stay in the detector's native coordinate space
//! (pixels for x/y, model-relative depth for z); nothing downstream depends
//! on scale or origin, so no normalization pass is applied.

use nalgebra::Vector3;

use crate::error::GestureError;

// ============================================================================
// HAND LANDMARK INDICES
// ============================================================================

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Number of keypoints in every observation
pub const LANDMARK_COUNT: usize = 21;

// ============================================================================
// FINGERS
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    /// Position in `Finger::ALL`
    pub fn index(&self) -> usize {
        match self {
            Finger::Thumb => 0,
            Finger::Index => 1,
            Finger::Middle => 2,
            Finger::Ring => 3,
            Finger::Pinky => 4,
        }
    }

    /// Landmark chain from the wrist out to the fingertip
    pub fn chain(&self) -> [usize; 5] {
        match self {
            Finger::Thumb => [WRIST, THUMB_CMC, THUMB_MCP, THUMB_IP, THUMB_TIP],
            Finger::Index => [WRIST, INDEX_MCP, INDEX_PIP, INDEX_DIP, INDEX_TIP],
            Finger::Middle => [WRIST, MIDDLE_MCP, MIDDLE_PIP, MIDDLE_DIP, MIDDLE_TIP],
            Finger::Ring => [WRIST, RING_MCP, RING_PIP, RING_DIP, RING_TIP],
            Finger::Pinky => [WRIST, PINKY_MCP, PINKY_PIP, PINKY_DIP, PINKY_TIP],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Finger::Thumb => "thumb",
            Finger::Index => "index",
            Finger::Middle => "middle",
            Finger::Ring => "ring",
            Finger::Pinky => "pinky",
        }
    }
}

// ============================================================================
// DATA STRUCTURES
// ============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HandLandmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl HandLandmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn to_vector(self) -> Vector3<f32> {
        Vector3::new(self.x, self.y, self.z)
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// One hand's 21 keypoints. Shape is checked once at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    landmarks: [HandLandmark; LANDMARK_COUNT],
}

impl Observation {
    pub fn new(landmarks: [HandLandmark; LANDMARK_COUNT]) -> Result<Self, GestureError> {
        if let Some(index) = landmarks.iter().position(|lm| !lm.is_finite()) {
            return Err(GestureError::NonFinite { index });
        }
        Ok(Self { landmarks })
    }

    /// Build from `[x, y, z]` triples as the hand-pose model reports them
    pub fn from_points(points: &[[f32; 3]]) -> Result<Self, GestureError> {
        if points.len() != LANDMARK_COUNT {
            return Err(GestureError::LandmarkCount {
                expected: LANDMARK_COUNT,
                found: points.len(),
            });
        }

        let mut landmarks = [HandLandmark::default(); LANDMARK_COUNT];
        for (slot, [x, y, z]) in landmarks.iter_mut().zip(points) {
            *slot = HandLandmark::new(*x, *y, *z);
        }
        Self::new(landmarks)
    }

    /// Build from a flat array of 63 values (21 landmarks × x, y, z)
    pub fn from_flat(data: &[f32]) -> Result<Self, GestureError> {
        if data.len() != LANDMARK_COUNT * 3 {
            return Err(GestureError::ValueCount {
                expected: LANDMARK_COUNT * 3,
                found: data.len(),
            });
        }

        let points: Vec<[f32; 3]> = data
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();
        Self::from_points(&points)
    }

    pub fn landmarks(&self) -> &[HandLandmark; LANDMARK_COUNT] {
        &self.landmarks
    }

    pub fn point(&self, index: usize) -> Vector3<f32> {
        self.landmarks[index].to_vector()
    }
}
