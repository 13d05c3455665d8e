//! Hand-pose model adapter
//!
//! Wraps the JS model object (anything with an `estimateHands(video)`
//! method returning `[{ landmarks: [[x, y, z] × 21] }]`). Each call is raced
//! against a timer so one stuck inference cannot wedge the loop.

use js_sys::{Array, Function, Promise, Reflect};
use log::{info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::error::{describe_js, DetectorError};
use crate::gesture::Observation;
use crate::scheduler::HandDetector;

use super::video::VideoFrame;

/// Rejection value of the timeout timer
const TIMEOUT_MARKER: &str = "signchat:detector-timeout";

pub struct JsHandDetector {
    model: JsValue,
    estimate_hands: Function,
    timeout_ms: u32,
}

impl JsHandDetector {
    /// Run the JS loader (e.g. `() => handpose.load()`) and keep the model
    pub async fn load(loader: &Function, timeout_ms: u32) -> Result<Self, DetectorError> {
        let pending = loader
            .call0(&JsValue::NULL)
            .map_err(|e| DetectorError::Load(describe_js(&e)))?;

        let model = JsFuture::from(Promise::resolve(&pending))
            .await
            .map_err(|e| DetectorError::Load(describe_js(&e)))?;

        let estimate_hands = Reflect::get(&model, &JsValue::from_str("estimateHands"))
            .map_err(|e| DetectorError::Load(describe_js(&e)))?
            .dyn_into::<Function>()
            .map_err(|_| DetectorError::Load("model has no estimateHands()".to_string()))?;

        info!("✅ Hand-pose model loaded");
        Ok(Self {
            model,
            estimate_hands,
            timeout_ms,
        })
    }
}

impl HandDetector<VideoFrame> for JsHandDetector {
    async fn estimate(&self, frame: &VideoFrame) -> Result<Vec<Observation>, DetectorError> {
        let pending = self
            .estimate_hands
            .call1(&self.model, frame.element())
            .map_err(|e| DetectorError::Estimate(describe_js(&e)))?;

        let race = Promise::race(&Array::of2(
            &Promise::resolve(&pending),
            &timeout_promise(self.timeout_ms),
        ));

        let hands = JsFuture::from(race).await.map_err(|e| {
            if e.as_string().as_deref() == Some(TIMEOUT_MARKER) {
                DetectorError::Timeout(self.timeout_ms)
            } else {
                DetectorError::Estimate(describe_js(&e))
            }
        })?;

        parse_hands(&hands)
    }
}

/// Promise that rejects with `TIMEOUT_MARKER` after `ms`
fn timeout_promise(ms: u32) -> Promise {
    Promise::new(&mut |_resolve, reject| {
        let Some(window) = web_sys::window() else {
            return;
        };
        let marker = JsValue::from_str(TIMEOUT_MARKER);
        let timeout = i32::try_from(ms).unwrap_or(i32::MAX);
        if let Err(e) =
            window.set_timeout_with_callback_and_timeout_and_arguments_1(&reject, timeout, &marker)
        {
            warn!("could not arm detector timeout: {}", describe_js(&e));
        }
    })
}

fn parse_hands(value: &JsValue) -> Result<Vec<Observation>, DetectorError> {
    let hands = value
        .dyn_ref::<Array>()
        .ok_or_else(|| DetectorError::Estimate("estimateHands() did not return an array".to_string()))?;

    keep_hands(hands.iter().map(|hand| parse_hand(&hand)))
}

/// The primary hand must be well formed. Extra hands are only drawn, so a
/// malformed one is dropped instead of failing the cycle.
fn keep_hands<I>(parsed: I) -> Result<Vec<Observation>, DetectorError>
where
    I: IntoIterator<Item = Result<Observation, DetectorError>>,
{
    let mut parsed = parsed.into_iter();
    let Some(primary) = parsed.next() else {
        return Ok(Vec::new());
    };

    let mut hands = vec![primary?];
    for (i, hand) in parsed.enumerate() {
        match hand {
            Ok(hand) => hands.push(hand),
            Err(err) => warn!("ignoring hand {}: {}", i + 1, err),
        }
    }
    Ok(hands)
}

fn parse_hand(hand: &JsValue) -> Result<Observation, DetectorError> {
    let landmarks = Reflect::get(hand, &JsValue::from_str("landmarks"))
        .map_err(|e| DetectorError::Estimate(describe_js(&e)))?
        .dyn_into::<Array>()
        .map_err(|_| DetectorError::Estimate("hand has no landmarks array".to_string()))?;

    // Missing coordinates become NaN and are rejected by Observation
    let points: Vec<[f32; 3]> = landmarks
        .iter()
        .map(|point| {
            let point = Array::from(&point);
            let coord = |i: u32| point.get(i).as_f64().unwrap_or(f64::NAN) as f32;
            [coord(0), coord(1), coord(2)]
        })
        .collect();

    Ok(Observation::from_points(&points)?)
}

/// Inverse of `parse_hands`, for the overlay drawing callback
pub(crate) fn hands_to_js(hands: &[Observation]) -> Array {
    hands
        .iter()
        .map(|hand| {
            let points: Array = hand
                .landmarks()
                .iter()
                .map(|lm| {
                    Array::of3(
                        &JsValue::from_f64(lm.x as f64),
                        &JsValue::from_f64(lm.y as f64),
                        &JsValue::from_f64(lm.z as f64),
                    )
                })
                .collect();
            let entry = js_sys::Object::new();
            if let Err(e) = Reflect::set(&entry, &JsValue::from_str("landmarks"), &points) {
                warn!("could not build hand for overlay: {}", describe_js(&e));
            }
            JsValue::from(entry)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GestureError;

    fn good() -> Result<Observation, DetectorError> {
        let points: Vec<[f32; 3]> = (0..21).map(|i| [i as f32, 0.0, 0.0]).collect();
        Ok(Observation::from_points(&points)?)
    }

    fn short() -> Result<Observation, DetectorError> {
        let points = vec![[0.0, 0.0, 0.0]; 20];
        Ok(Observation::from_points(&points)?)
    }

    #[test]
    fn test_no_hands() {
        assert_eq!(keep_hands(Vec::new()), Ok(Vec::new()));
    }

    #[test]
    fn test_malformed_extra_hand_is_dropped() {
        let hands = keep_hands(vec![good(), short(), good()]).unwrap();
        assert_eq!(hands.len(), 2);
        assert_eq!(hands[0], good().unwrap());
    }

    #[test]
    fn test_malformed_primary_hand_fails() {
        assert_eq!(
            keep_hands(vec![short(), good()]),
            Err(DetectorError::Malformed(GestureError::LandmarkCount { expected: 21, found: 20 }))
        );
    }
}
