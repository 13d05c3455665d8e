//! App state and wasm entry points
//!
//! One page owns one session: the input buffer and chat history, an
//! optional detection loop driven by `setInterval`, and an optional socket
//! to the peer page. JS is told about changes through a single
//! `on_change` callback and pulls whatever it needs with the getters.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Function};
use log::{info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlCanvasElement, HtmlVideoElement};

use crate::error::describe_js;
use crate::gesture::{select, GestureLibrary, Observation};
use crate::scheduler::{CycleOutcome, DetectionLoop};
use crate::session::{ConnectionState, Role, SendOutcome, SessionConfig, SessionState};

use super::detector::JsHandDetector;
use super::socket::{Offline, WebSocketChannel};
use super::video::{CanvasOverlay, VideoCapture};

type BrowserLoop = DetectionLoop<JsHandDetector, VideoCapture, CanvasOverlay>;

// ============================================================================
// TIMER
// ============================================================================

/// `setInterval` registration, cleared on drop
struct Interval {
    handle: i32,
    _tick: Closure<dyn FnMut()>,
}

impl Interval {
    fn new(period_ms: u32, tick: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let tick = Closure::<dyn FnMut()>::new(tick);
        let period = i32::try_from(period_ms).unwrap_or(i32::MAX);
        let handle = window.set_interval_with_callback_and_timeout_and_arguments_0(
            tick.as_ref().unchecked_ref(),
            period,
        )?;
        Ok(Self { handle, _tick: tick })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.handle);
        }
    }
}

// ============================================================================
// APP STATE
// ============================================================================

struct App {
    config: SessionConfig,
    session: Rc<RefCell<SessionState>>,
    detection: Option<Rc<BrowserLoop>>,
    timer: Option<Interval>,
    channel: Option<WebSocketChannel>,
    on_change: Option<Function>,
}

impl Default for App {
    fn default() -> Self {
        let config = SessionConfig::default();
        let session = Rc::new(RefCell::new(SessionState::new(&config)));
        Self {
            config,
            session,
            detection: None,
            timer: None,
            channel: None,
            on_change: None,
        }
    }
}

thread_local! {
    static APP: RefCell<App> = RefCell::new(App::default());
}

fn session() -> Rc<RefCell<SessionState>> {
    APP.with(|app| Rc::clone(&app.borrow().session))
}

/// Call the JS change listener. The callback is cloned out first so it can
/// call back into the module.
fn notify_change() {
    let callback = APP.with(|app| app.borrow().on_change.clone());
    if let Some(callback) = callback {
        if let Err(e) = callback.call0(&JsValue::NULL) {
            warn!("on_change callback failed: {}", describe_js(&e));
        }
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Override session settings. Omitted values keep their defaults.
///
/// Resets the input buffer and chat history but keeps the camera setting
/// and connection; call before `start_session`.
#[wasm_bindgen]
pub fn configure(
    threshold: Option<f32>,
    cycle_period_ms: Option<u32>,
    detector_timeout_ms: Option<u32>,
    socket_url: Option<String>,
    role: Option<String>,
    coalesce_consecutive: Option<bool>,
) -> Result<(), JsValue> {
    let defaults = SessionConfig::default();
    let local_role = match role {
        Some(label) => Role::parse(&label)
            .ok_or_else(|| JsValue::from_str(&format!("unknown role '{}'", label)))?,
        None => defaults.local_role,
    };

    let config = SessionConfig {
        confidence_threshold: threshold.unwrap_or(defaults.confidence_threshold),
        cycle_period_ms: cycle_period_ms.unwrap_or(defaults.cycle_period_ms),
        detector_timeout_ms: detector_timeout_ms.unwrap_or(defaults.detector_timeout_ms),
        socket_url: socket_url.unwrap_or(defaults.socket_url),
        local_role,
        coalesce_consecutive: coalesce_consecutive.unwrap_or(defaults.coalesce_consecutive),
    };
    config.validate()?;

    APP.with(|app| {
        let mut app = app.borrow_mut();
        app.session.borrow_mut().reconfigure(&config);
        app.config = config;
    });

    info!("session configured");
    notify_change();
    Ok(())
}

/// Register (or clear, with `undefined`) the change listener
#[wasm_bindgen]
pub fn set_on_change(callback: Option<Function>) {
    APP.with(|app| app.borrow_mut().on_change = callback);
}

// ============================================================================
// DETECTION LOOP
// ============================================================================

/// Load the hand-pose model and start detecting.
///
/// `loader` is a JS function returning the model (or a promise of it).
/// `draw_hand(hands, ctx)` paints the overlay each cycle.
#[wasm_bindgen]
pub async fn start_session(
    loader: Function,
    video: HtmlVideoElement,
    canvas: HtmlCanvasElement,
    draw_hand: Function,
) -> Result<(), JsValue> {
    stop_session();

    let config = APP.with(|app| app.borrow().config.clone());
    let detector = JsHandDetector::load(&loader, config.detector_timeout_ms).await?;

    let detection = Rc::new(
        DetectionLoop::new(
            detector,
            VideoCapture::new(video, canvas.clone()),
            CanvasOverlay::new(canvas, draw_hand),
            session(),
        )
        .with_threshold(config.confidence_threshold)
        .with_clock(js_sys::Date::now),
    );
    detection.start();

    let ticking = Rc::clone(&detection);
    let timer = Interval::new(config.cycle_period_ms, move || {
        let detection = Rc::clone(&ticking);
        spawn_local(async move {
            if let CycleOutcome::Detected(_) = detection.run_cycle().await {
                notify_change();
            }
        });
    })?;

    // A second start may have finished while the model was loading
    stop_session();
    APP.with(|app| {
        let mut app = app.borrow_mut();
        app.detection = Some(detection);
        app.timer = Some(timer);
    });

    info!("session started ({} ms period)", config.cycle_period_ms);
    Ok(())
}

/// Stop the timer and discard any in-flight detector result
#[wasm_bindgen]
pub fn stop_session() {
    let (detection, timer) = APP.with(|app| {
        let mut app = app.borrow_mut();
        (app.detection.take(), app.timer.take())
    });

    drop(timer);
    if let Some(detection) = detection {
        detection.dispose();
    }
}

/// Classify one hand given as 63 flat values (x, y, z per landmark)
/// against the configured threshold, outside the detection loop
#[wasm_bindgen]
pub fn classify_landmarks(flat: &[f32]) -> Result<Option<String>, JsValue> {
    let observation = Observation::from_flat(flat)?;
    let threshold = APP.with(|app| app.borrow().config.confidence_threshold);
    Ok(select(&observation, &GestureLibrary::alphabet(), threshold).map(|g| g.name.to_string()))
}

#[wasm_bindgen]
pub fn is_running() -> bool {
    APP.with(|app| app.borrow().detection.is_some())
}

/// Flip the camera on/off; returns the new setting
#[wasm_bindgen]
pub fn toggle_camera() -> bool {
    let enabled = session().borrow_mut().toggle_camera();
    info!("camera {}", if enabled { "on" } else { "off" });
    notify_change();
    enabled
}

/// Cycle counters for the debug overlay
#[wasm_bindgen]
pub fn get_debug_overlay_text() -> String {
    APP.with(|app| {
        app.borrow()
            .detection
            .as_ref()
            .map(|detection| detection.stats().overlay_text())
            .unwrap_or_default()
    })
}

// ============================================================================
// INPUT BUFFER
// ============================================================================

#[wasm_bindgen]
pub fn get_input_text() -> String {
    session().borrow().input_text().to_string()
}

#[wasm_bindgen]
pub fn set_input_text(text: &str) {
    session().borrow_mut().set_input_text(text);
}

#[wasm_bindgen]
pub fn reset_input() {
    session().borrow_mut().reset_input();
    notify_change();
}

/// Most recently recognized letter, if any
#[wasm_bindgen]
pub fn get_detected_gesture() -> Option<String> {
    session()
        .borrow()
        .detected_gesture()
        .map(|gesture| gesture.name.to_string())
}

#[wasm_bindgen]
pub fn get_detected_confidence() -> Option<f32> {
    session()
        .borrow()
        .detected_gesture()
        .map(|gesture| gesture.confidence)
}

// ============================================================================
// CHAT
// ============================================================================

/// Open the socket to the configured URL, replacing any previous one
#[wasm_bindgen]
pub fn connect() -> Result<(), JsValue> {
    disconnect();

    let url = APP.with(|app| app.borrow().config.socket_url.clone());
    let channel = WebSocketChannel::connect(&url, session(), Rc::new(notify_change))?;
    APP.with(|app| app.borrow_mut().channel = Some(channel));

    info!("connecting to {}", url);
    notify_change();
    Ok(())
}

#[wasm_bindgen]
pub fn disconnect() {
    let channel = APP.with(|app| app.borrow_mut().channel.take());
    if channel.is_none() {
        return;
    }
    drop(channel);

    session().borrow_mut().set_connection_state(ConnectionState::Closed);
    notify_change();
}

#[wasm_bindgen]
pub fn connection_state() -> String {
    session().borrow().connection_state().as_str().to_string()
}

/// Send the input buffer to the peer.
///
/// Returns `true` when the channel accepted the message. A refused message
/// is still recorded in the history, marked undelivered.
#[wasm_bindgen]
pub fn send_message() -> bool {
    let outcome = APP.with(|app| {
        let app = app.borrow();
        let mut session = app.session.borrow_mut();
        match &app.channel {
            Some(channel) => session.send_message(channel),
            None => session.send_message(&Offline),
        }
    });

    match outcome {
        SendOutcome::Empty => false,
        SendOutcome::Sent => {
            notify_change();
            true
        }
        SendOutcome::Dropped(_) => {
            notify_change();
            false
        }
    }
}

/// Every message as `"Role: text"`, oldest first
#[wasm_bindgen]
pub fn get_messages() -> Array {
    session()
        .borrow()
        .history()
        .lines()
        .into_iter()
        .map(|line| JsValue::from_str(&line))
        .collect()
}

/// Texts sent by one role, for that role's pane
#[wasm_bindgen]
pub fn get_role_messages(role: &str) -> Result<Array, JsValue> {
    let role = Role::parse(role).ok_or_else(|| JsValue::from_str(&format!("unknown role '{}'", role)))?;
    Ok(session()
        .borrow()
        .history()
        .from_role(role)
        .map(|message| JsValue::from_str(&message.text))
        .collect())
}

#[wasm_bindgen]
pub fn get_local_role() -> String {
    session().borrow().local_role().label().to_string()
}
