//! Scoring and best-match selection

use super::descriptor::SignDescriptor;
use super::landmarks::Observation;
use super::library::GestureLibrary;
use super::pose::HandPose;

/// Minimum score for a letter to count as detected (inclusive)
pub const CONFIDENCE_THRESHOLD: f32 = 6.5;

/// Score of one descriptor against one observation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureScore {
    pub name: &'static str,
    pub confidence: f32,
}

/// Winning letter for one observation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectedGesture {
    pub name: &'static str,
    pub confidence: f32,
}

/// Confidence of `descriptor` for `observation`
pub fn score(observation: &Observation, descriptor: &SignDescriptor) -> f32 {
    descriptor.score(&HandPose::from_observation(observation))
}

/// Every descriptor's score, in library order
pub fn scores(observation: &Observation, library: &GestureLibrary) -> Vec<GestureScore> {
    let pose = HandPose::from_observation(observation);
    library
        .iter()
        .map(|d| GestureScore {
            name: d.name(),
            confidence: d.score(&pose),
        })
        .collect()
}

/// Highest-scoring descriptor at or above `threshold`.
///
/// Ties keep the descriptor that comes first in the library.
pub fn select(
    observation: &Observation,
    library: &GestureLibrary,
    threshold: f32,
) -> Option<DetectedGesture> {
    let best = scores(observation, library)
        .into_iter()
        .fold(None, |best: Option<GestureScore>, current| match best {
            Some(b) if b.confidence >= current.confidence => Some(b),
            _ => Some(current),
        })?;

    if best.confidence < threshold {
        return None;
    }

    Some(DetectedGesture {
        name: best.name,
        confidence: best.confidence,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::landmarks::Finger;
    use crate::gesture::pose::FingerCurl::*;
    use crate::gesture::pose::Relationship;
    use crate::gesture::test_hands::HandBuilder;

    /// Thumb tucked, four fingers up together
    fn flat_hand() -> Observation {
        HandBuilder::new()
            .finger(Finger::Thumb, FullCurl, 45.0)
            .finger(Finger::Index, NoCurl, 0.0)
            .finger(Finger::Middle, NoCurl, 0.0)
            .finger(Finger::Ring, NoCurl, 0.0)
            .finger(Finger::Pinky, NoCurl, 0.0)
            .build()
    }

    fn flat_descriptor(name: &'static str, direction_weight: f32) -> SignDescriptor {
        SignDescriptor::new(name)
            .curls([FullCurl, NoCurl, NoCurl, NoCurl, NoCurl], 1.0)
            .direction(Finger::Index, Finger::Middle, Relationship::Parallel, direction_weight)
    }

    fn fist_descriptor(name: &'static str) -> SignDescriptor {
        SignDescriptor::new(name)
            .curls([HalfCurl, FullCurl, FullCurl, FullCurl, FullCurl], 1.0)
            .direction(Finger::Index, Finger::Ring, Relationship::Opposed, 2.0)
    }

    #[test]
    fn test_score_is_deterministic() {
        let obs = flat_hand();
        let lib = GestureLibrary::alphabet();
        let first = scores(&obs, &lib);
        let second = scores(&obs, &lib);
        assert_eq!(first, second);
        assert!(first.iter().all(|s| s.confidence >= 0.0));
    }

    #[test]
    fn test_engineered_hand_selects_its_descriptor() {
        let lib = GestureLibrary::new(vec![fist_descriptor("fist"), flat_descriptor("flat", 2.0)]);
        let obs = flat_hand();

        assert_eq!(score(&obs, lib.get("fist").unwrap()), 0.0);
        assert_eq!(score(&obs, lib.get("flat").unwrap()), 7.0);

        let detected = select(&obs, &lib, CONFIDENCE_THRESHOLD).unwrap();
        assert_eq!(detected.name, "flat");
        assert_eq!(detected.confidence, 7.0);
    }

    #[test]
    fn test_nothing_satisfied_means_no_detection() {
        let lib = GestureLibrary::new(vec![fist_descriptor("fist")]);
        assert_eq!(select(&flat_hand(), &lib, CONFIDENCE_THRESHOLD), None);
    }

    #[test]
    fn test_empty_library_detects_nothing() {
        let lib = GestureLibrary::new(Vec::new());
        assert_eq!(select(&flat_hand(), &lib, 0.0), None);
    }

    #[test]
    fn test_tie_prefers_earlier_descriptor() {
        let lib = GestureLibrary::new(vec![
            fist_descriptor("fist"),
            flat_descriptor("first", 2.0),
            flat_descriptor("second", 2.0),
        ]);
        for _ in 0..5 {
            assert_eq!(select(&flat_hand(), &lib, CONFIDENCE_THRESHOLD).unwrap().name, "first");
        }
    }

    #[test]
    fn test_threshold_is_inclusive() {
        // 5 curls + 1.5 = exactly 6.5
        let lib = GestureLibrary::new(vec![flat_descriptor("edge", 1.5)]);
        let detected = select(&flat_hand(), &lib, CONFIDENCE_THRESHOLD).unwrap();
        assert_eq!(detected.confidence, 6.5);

        // One unit below
        let lib = GestureLibrary::new(vec![flat_descriptor("short", 0.5)]);
        assert_eq!(select(&flat_hand(), &lib, CONFIDENCE_THRESHOLD), None);
    }

    #[test]
    fn test_alphabet_recognizes_b() {
        let detected = select(&flat_hand(), &GestureLibrary::alphabet(), CONFIDENCE_THRESHOLD);
        assert_eq!(detected.map(|d| d.name), Some("B"));
    }

    #[test]
    fn test_alphabet_recognizes_y() {
        let obs = HandBuilder::new()
            .finger(Finger::Thumb, NoCurl, 90.0)
            .finger(Finger::Index, FullCurl, 0.0)
            .finger(Finger::Middle, FullCurl, 0.0)
            .finger(Finger::Ring, FullCurl, 0.0)
            .finger(Finger::Pinky, NoCurl, -90.0)
            .build();
        let detected = select(&obs, &GestureLibrary::alphabet(), CONFIDENCE_THRESHOLD).unwrap();
        assert_eq!(detected.name, "Y");
        assert_eq!(detected.confidence, 7.0);
    }

    #[test]
    fn test_alphabet_ignores_collapsed_hand() {
        let obs = HandBuilder::collapsed();
        assert_eq!(select(&obs, &GestureLibrary::alphabet(), CONFIDENCE_THRESHOLD), None);
    }

    #[test]
    fn test_position_does_not_change_result() {
        let lib = GestureLibrary::alphabet();
        let here = flat_hand();
        let there = HandBuilder::new()
            .wrist_at(40.0, 90.0)
            .finger(Finger::Thumb, FullCurl, 45.0)
            .build();
        assert_eq!(
            select(&here, &lib, CONFIDENCE_THRESHOLD).map(|d| d.name),
            select(&there, &lib, CONFIDENCE_THRESHOLD).map(|d| d.name)
        );
    }
}
