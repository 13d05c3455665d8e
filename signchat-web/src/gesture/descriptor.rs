//! Sign descriptors: a name plus weighted rules over a hand pose

use super::landmarks::Finger;
use super::pose::{FingerCurl, HandPose, Relationship};

/// A single weighted expectation about the hand
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Rule {
    /// `finger` has the given curl state
    Curl {
        finger: Finger,
        curl: FingerCurl,
        weight: f32,
    },
    /// The directions of `a` and `b` relate as given
    Direction {
        a: Finger,
        b: Finger,
        relationship: Relationship,
        weight: f32,
    },
}

impl Rule {
    pub fn weight(&self) -> f32 {
        match self {
            Rule::Curl { weight, .. } | Rule::Direction { weight, .. } => *weight,
        }
    }

    pub fn is_satisfied(&self, pose: &HandPose) -> bool {
        match *self {
            Rule::Curl { finger, curl, .. } => pose.curl(finger) == curl,
            Rule::Direction { a, b, relationship, .. } => {
                pose.relationship(a, b) == Some(relationship)
            }
        }
    }
}

/// Named rule set for one sign. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct SignDescriptor {
    name: &'static str,
    rules: Vec<Rule>,
}

impl SignDescriptor {
    pub fn new(name: &'static str) -> Self {
        Self { name, rules: Vec::new() }
    }

    pub fn curl(mut self, finger: Finger, curl: FingerCurl, weight: f32) -> Self {
        debug_assert!(weight >= 0.0, "negative rule weight");
        self.rules.push(Rule::Curl { finger, curl, weight });
        self
    }

    pub fn direction(mut self, a: Finger, b: Finger, relationship: Relationship, weight: f32) -> Self {
        debug_assert!(weight >= 0.0, "negative rule weight");
        self.rules.push(Rule::Direction { a, b, relationship, weight });
        self
    }

    /// Five curl rules of equal weight, thumb to pinky
    pub fn curls(self, curls: [FingerCurl; 5], weight: f32) -> Self {
        Finger::ALL
            .into_iter()
            .zip(curls)
            .fold(self, |d, (finger, curl)| d.curl(finger, curl, weight))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Score of a perfect match
    pub fn max_score(&self) -> f32 {
        self.rules.iter().map(Rule::weight).sum()
    }

    /// Sum of the weights of every satisfied rule
    pub fn score(&self, pose: &HandPose) -> f32 {
        self.rules
            .iter()
            .filter(|rule| rule.is_satisfied(pose))
            .map(Rule::weight)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::test_hands::HandBuilder;
    use crate::gesture::pose::FingerCurl::*;

    fn fist_pose() -> HandPose {
        let obs = HandBuilder::new()
            .finger(Finger::Thumb, FullCurl, 30.0)
            .finger(Finger::Index, FullCurl, 0.0)
            .finger(Finger::Middle, FullCurl, 0.0)
            .finger(Finger::Ring, FullCurl, 0.0)
            .finger(Finger::Pinky, FullCurl, 0.0)
            .build();
        HandPose::from_observation(&obs)
    }

    #[test]
    fn test_score_sums_satisfied_weights() {
        let descriptor = SignDescriptor::new("fist-ish")
            .curl(Finger::Index, FullCurl, 1.0)
            .curl(Finger::Middle, FullCurl, 0.75)
            .curl(Finger::Ring, NoCurl, 2.0)
            .direction(Finger::Index, Finger::Middle, Relationship::Parallel, 1.5)
            .direction(Finger::Index, Finger::Pinky, Relationship::Opposed, 3.0);

        let score = descriptor.score(&fist_pose());
        assert!((score - 3.25).abs() < 1e-6);
        assert!((descriptor.max_score() - 8.25).abs() < 1e-6);
    }

    #[test]
    fn test_empty_descriptor_scores_zero() {
        assert_eq!(SignDescriptor::new("empty").score(&fist_pose()), 0.0);
    }

    #[test]
    fn test_curls_helper_orders_thumb_to_pinky() {
        let d = SignDescriptor::new("x").curls([NoCurl, HalfCurl, FullCurl, HalfCurl, NoCurl], 1.0);
        let fingers: Vec<Finger> = d
            .rules()
            .iter()
            .map(|r| match r {
                Rule::Curl { finger, .. } => *finger,
                Rule::Direction { .. } => unreachable!(),
            })
            .collect();
        assert_eq!(fingers, Finger::ALL.to_vec());
    }

    #[test]
    fn test_direction_rule_fails_on_collapsed_hand() {
        let pose = HandPose::from_observation(&HandBuilder::collapsed());
        let rule = Rule::Direction {
            a: Finger::Index,
            b: Finger::Middle,
            relationship: Relationship::Parallel,
            weight: 1.0,
        };
        assert!(!rule.is_satisfied(&pose));
    }
}
