//! Session configuration

use crate::error::ConfigError;
use crate::gesture::CONFIDENCE_THRESHOLD;

use super::chat::Role;

/// Default detection period (one letter per second at most)
pub const DEFAULT_CYCLE_PERIOD_MS: u32 = 1000;

/// Default bound on one hand-pose model call
pub const DEFAULT_DETECTOR_TIMEOUT_MS: u32 = 5000;

pub const DEFAULT_SOCKET_URL: &str = "ws://localhost:5000";

#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    /// Minimum score for a letter to be accepted (inclusive)
    pub confidence_threshold: f32,
    /// Interval between detection cycles
    pub cycle_period_ms: u32,
    /// Longest a single detector call may take before the cycle is abandoned
    pub detector_timeout_ms: u32,
    /// Peer channel endpoint
    pub socket_url: String,
    /// Which side of the conversation this page is
    pub local_role: Role,
    /// Merge consecutive messages from the same role into one entry
    pub coalesce_consecutive: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: CONFIDENCE_THRESHOLD,
            cycle_period_ms: DEFAULT_CYCLE_PERIOD_MS,
            detector_timeout_ms: DEFAULT_DETECTOR_TIMEOUT_MS,
            socket_url: DEFAULT_SOCKET_URL.to_string(),
            local_role: Role::Student,
            coalesce_consecutive: false,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.confidence_threshold.is_finite() || self.confidence_threshold < 0.0 {
            return Err(ConfigError::Threshold(self.confidence_threshold));
        }
        if self.cycle_period_ms == 0 {
            return Err(ConfigError::Period);
        }
        if self.detector_timeout_ms == 0 {
            return Err(ConfigError::Timeout);
        }
        Ok(())
    }
}
