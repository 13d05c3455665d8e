//! Fingerspelling alphabet
//!
//! One descriptor per letter, stored in A..Z order. The order is part of the
//! contract: when two letters score the same, the earlier one wins.
//!
//! Each letter states the curl of all five fingers (weight 1.0 each) and two
//! direction relationships worth 2.0 together, so a perfect match is 7.0.
//! J and Z are signed with motion; their descriptors capture the starting
//! handshape only.

use super::descriptor::SignDescriptor;
use super::landmarks::Finger::{Index, Middle, Pinky, Ring, Thumb};
use super::pose::FingerCurl::{FullCurl, HalfCurl, NoCurl};
use super::pose::Relationship::{Opposed, Parallel, Perpendicular, Spread};

/// Weight of each curl rule
const CURL_WEIGHT: f32 = 1.0;

/// Ordered, read-only set of sign descriptors
#[derive(Clone, Debug)]
pub struct GestureLibrary {
    descriptors: Vec<SignDescriptor>,
}

impl GestureLibrary {
    pub fn new(descriptors: Vec<SignDescriptor>) -> Self {
        Self { descriptors }
    }

    /// The 26-letter alphabet
    pub fn alphabet() -> Self {
        Self::new(vec![
            SignDescriptor::new("A")
                .curls([NoCurl, FullCurl, FullCurl, FullCurl, FullCurl], CURL_WEIGHT)
                .direction(Index, Middle, Parallel, 1.0)
                .direction(Thumb, Index, Opposed, 1.0),
            SignDescriptor::new("B")
                .curls([FullCurl, NoCurl, NoCurl, NoCurl, NoCurl], CURL_WEIGHT)
                .direction(Index, Middle, Parallel, 1.0)
                .direction(Middle, Ring, Parallel, 1.0),
            SignDescriptor::new("C")
                .curls([HalfCurl, HalfCurl, HalfCurl, HalfCurl, HalfCurl], CURL_WEIGHT)
                .direction(Index, Middle, Parallel, 1.0)
                .direction(Thumb, Index, Spread, 1.0),
            SignDescriptor::new("D")
                .curls([HalfCurl, NoCurl, FullCurl, FullCurl, FullCurl], CURL_WEIGHT)
                .direction(Middle, Ring, Parallel, 1.0)
                .direction(Index, Middle, Opposed, 1.0),
            SignDescriptor::new("E")
                .curls([FullCurl, FullCurl, FullCurl, FullCurl, FullCurl], CURL_WEIGHT)
                .direction(Index, Middle, Parallel, 1.0)
                .direction(Thumb, Index, Spread, 1.0),
            SignDescriptor::new("F")
                .curls([HalfCurl, HalfCurl, NoCurl, NoCurl, NoCurl], CURL_WEIGHT)
                .direction(Middle, Ring, Parallel, 1.0)
                .direction(Ring, Pinky, Spread, 1.0),
            SignDescriptor::new("G")
                .curls([NoCurl, NoCurl, FullCurl, FullCurl, FullCurl], CURL_WEIGHT)
                .direction(Thumb, Index, Parallel, 1.0)
                .direction(Index, Middle, Opposed, 1.0),
            SignDescriptor::new("H")
                .curls([FullCurl, NoCurl, NoCurl, FullCurl, FullCurl], CURL_WEIGHT)
                .direction(Index, Middle, Parallel, 1.5)
                .direction(Thumb, Index, Perpendicular, 0.5),
            SignDescriptor::new("I")
                .curls([FullCurl, FullCurl, FullCurl, FullCurl, NoCurl], CURL_WEIGHT)
                .direction(Index, Middle, Parallel, 1.0)
                .direction(Pinky, Ring, Opposed, 1.0),
            SignDescriptor::new("J")
                .curls([FullCurl, FullCurl, FullCurl, FullCurl, NoCurl], CURL_WEIGHT)
                .direction(Index, Middle, Parallel, 1.0)
                .direction(Pinky, Ring, Perpendicular, 1.0),
            SignDescriptor::new("K")
                .curls([NoCurl, NoCurl, NoCurl, FullCurl, FullCurl], CURL_WEIGHT)
                .direction(Index, Middle, Spread, 1.0)
                .direction(Ring, Pinky, Parallel, 1.0),
            SignDescriptor::new("L")
                .curls([NoCurl, NoCurl, FullCurl, FullCurl, FullCurl], CURL_WEIGHT)
                .direction(Thumb, Index, Perpendicular, 1.5)
                .direction(Middle, Ring, Parallel, 0.5),
            SignDescriptor::new("M")
                .curls([HalfCurl, HalfCurl, HalfCurl, HalfCurl, FullCurl], CURL_WEIGHT)
                .direction(Index, Middle, Parallel, 1.0)
                .direction(Ring, Pinky, Perpendicular, 1.0),
            SignDescriptor::new("N")
                .curls([HalfCurl, HalfCurl, HalfCurl, FullCurl, FullCurl], CURL_WEIGHT)
                .direction(Index, Middle, Parallel, 1.0)
                .direction(Middle, Ring, Perpendicular, 1.0),
            SignDescriptor::new("O")
                .curls([HalfCurl, HalfCurl, HalfCurl, HalfCurl, HalfCurl], CURL_WEIGHT)
                .direction(Index, Middle, Parallel, 1.0)
                .direction(Thumb, Index, Parallel, 1.0),
            SignDescriptor::new("P")
                .curls([NoCurl, NoCurl, HalfCurl, FullCurl, FullCurl], CURL_WEIGHT)
                .direction(Index, Middle, Perpendicular, 1.0)
                .direction(Ring, Pinky, Parallel, 1.0),
            SignDescriptor::new("Q")
                .curls([NoCurl, HalfCurl, FullCurl, FullCurl, FullCurl], CURL_WEIGHT)
                .direction(Thumb, Index, Perpendicular, 1.0)
                .direction(Ring, Pinky, Parallel, 1.0),
            SignDescriptor::new("R")
                .curls([HalfCurl, NoCurl, NoCurl, FullCurl, FullCurl], CURL_WEIGHT)
                .direction(Index, Middle, Parallel, 1.5)
                .direction(Ring, Pinky, Parallel, 0.5),
            SignDescriptor::new("S")
                .curls([HalfCurl, FullCurl, FullCurl, FullCurl, FullCurl], CURL_WEIGHT)
                .direction(Index, Middle, Parallel, 1.0)
                .direction(Thumb, Index, Perpendicular, 1.0),
            SignDescriptor::new("T")
                .curls([HalfCurl, FullCurl, FullCurl, FullCurl, FullCurl], CURL_WEIGHT)
                .direction(Index, Middle, Parallel, 1.0)
                .direction(Thumb, Index, Spread, 1.0),
            SignDescriptor::new("U")
                .curls([FullCurl, NoCurl, NoCurl, FullCurl, FullCurl], CURL_WEIGHT)
                .direction(Index, Middle, Parallel, 1.5)
                .direction(Thumb, Index, Opposed, 0.5),
            SignDescriptor::new("V")
                .curls([FullCurl, NoCurl, NoCurl, FullCurl, FullCurl], CURL_WEIGHT)
                .direction(Index, Middle, Spread, 1.5)
                .direction(Ring, Pinky, Parallel, 0.5),
            SignDescriptor::new("W")
                .curls([FullCurl, NoCurl, NoCurl, NoCurl, FullCurl], CURL_WEIGHT)
                .direction(Index, Middle, Spread, 1.0)
                .direction(Middle, Ring, Spread, 1.0),
            SignDescriptor::new("X")
                .curls([FullCurl, HalfCurl, FullCurl, FullCurl, FullCurl], CURL_WEIGHT)
                .direction(Middle, Ring, Parallel, 1.0)
                .direction(Index, Middle, Perpendicular, 1.0),
            SignDescriptor::new("Y")
                .curls([NoCurl, FullCurl, FullCurl, FullCurl, NoCurl], CURL_WEIGHT)
                .direction(Thumb, Pinky, Opposed, 1.0)
                .direction(Index, Middle, Parallel, 1.0),
            SignDescriptor::new("Z")
                .curls([FullCurl, NoCurl, FullCurl, FullCurl, FullCurl], CURL_WEIGHT)
                .direction(Middle, Ring, Parallel, 1.0)
                .direction(Index, Middle, Opposed, 1.0),
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = &SignDescriptor> {
        self.descriptors.iter()
    }

    pub fn get(&self, name: &str) -> Option<&SignDescriptor> {
        self.descriptors.iter().find(|d| d.name() == name)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl Default for GestureLibrary {
    fn default() -> Self {
        Self::alphabet()
    }
}
