//! Error types shared by the gesture pipeline, the detection loop and the
//! JS bridge.
//!
//! Every error converts into a `JsValue` so wasm entry points can use `?`.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Malformed hand observation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GestureError {
    #[error("hand observation has {found} landmarks (expected {expected})")]
    LandmarkCount { expected: usize, found: usize },
    #[error("flat landmark array has {found} values (expected {expected})")]
    ValueCount { expected: usize, found: usize },
    #[error("landmark {index} has a non-finite coordinate")]
    NonFinite { index: usize },
}

/// Failures of the external hand-pose model
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DetectorError {
    /// Model failed to load. Fatal for the session.
    #[error("hand-pose model failed to load: {0}")]
    Load(String),
    #[error("hand estimation failed: {0}")]
    Estimate(String),
    #[error("hand estimation timed out after {0} ms")]
    Timeout(u32),
    #[error("detector returned a malformed hand: {0}")]
    Malformed(#[from] GestureError),
}

/// Failures of the teacher/student message channel
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("message channel is not connected")]
    Disconnected,
    #[error("send failed: {0}")]
    Send(String),
    #[error("could not open channel: {0}")]
    Connect(String),
}

/// Rejected session configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("confidence threshold must be finite and non-negative, got {0}")]
    Threshold(f32),
    #[error("cycle period must be at least 1 ms")]
    Period,
    #[error("detector timeout must be at least 1 ms")]
    Timeout,
}

impl From<GestureError> for JsValue {
    fn from(err: GestureError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl From<DetectorError> for JsValue {
    fn from(err: DetectorError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl From<ChannelError> for JsValue {
    fn from(err: ChannelError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl From<ConfigError> for JsValue {
    fn from(err: ConfigError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Render a JS exception for logs and error payloads
pub(crate) fn describe_js(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_count_message() {
        let err = GestureError::LandmarkCount { expected: 21, found: 20 };
        assert_eq!(err.to_string(), "hand observation has 20 landmarks (expected 21)");
    }

    #[test]
    fn test_malformed_wraps_gesture_error() {
        let err: DetectorError = GestureError::NonFinite { index: 3 }.into();
        assert!(matches!(err, DetectorError::Malformed(GestureError::NonFinite { index: 3 })));
    }
}
