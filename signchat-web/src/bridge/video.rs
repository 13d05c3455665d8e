//! Webcam `<video>` capture source and `<canvas>` overlay

use js_sys::Function;
use log::warn;
use wasm_bindgen::JsValue;
use web_sys::{HtmlCanvasElement, HtmlVideoElement};

use crate::error::describe_js;
use crate::gesture::Observation;
use crate::scheduler::{CaptureSource, LandmarkRenderer};

use super::detector::hands_to_js;

/// `HTMLMediaElement.HAVE_ENOUGH_DATA`
const HAVE_ENOUGH_DATA: u16 = 4;

/// One frame handed to the detector: the live element plus its size
pub struct VideoFrame {
    element: HtmlVideoElement,
    pub width: u32,
    pub height: u32,
}

impl VideoFrame {
    pub fn element(&self) -> &HtmlVideoElement {
        &self.element
    }
}

pub struct VideoCapture {
    video: HtmlVideoElement,
    canvas: HtmlCanvasElement,
}

impl VideoCapture {
    pub fn new(video: HtmlVideoElement, canvas: HtmlCanvasElement) -> Self {
        Self { video, canvas }
    }
}

impl CaptureSource for VideoCapture {
    type Frame = VideoFrame;

    /// Also sizes the video and overlay canvas to the stream's resolution
    fn frame(&self) -> Option<VideoFrame> {
        if self.video.ready_state() != HAVE_ENOUGH_DATA {
            return None;
        }

        let width = self.video.video_width();
        let height = self.video.video_height();

        self.video.set_width(width);
        self.video.set_height(height);
        self.canvas.set_width(width);
        self.canvas.set_height(height);

        Some(VideoFrame {
            element: self.video.clone(),
            width,
            height,
        })
    }
}

/// Hands the detector output to a JS `draw(hands, ctx)` function
pub struct CanvasOverlay {
    canvas: HtmlCanvasElement,
    draw: Function,
}

impl CanvasOverlay {
    pub fn new(canvas: HtmlCanvasElement, draw: Function) -> Self {
        Self { canvas, draw }
    }
}

impl LandmarkRenderer for CanvasOverlay {
    fn draw(&self, hands: &[Observation]) {
        let ctx = match self.canvas.get_context("2d") {
            Ok(Some(ctx)) => ctx,
            Ok(None) => {
                warn!("overlay canvas has no 2d context");
                return;
            }
            Err(e) => {
                warn!("overlay context error: {}", describe_js(&e));
                return;
            }
        };

        if let Err(e) = self.draw.call2(&JsValue::NULL, &hands_to_js(hands), &ctx) {
            warn!("overlay draw failed: {}", describe_js(&e));
        }
    }
}
