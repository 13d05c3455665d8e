//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod app;
mod detector;
mod socket;
mod video;

pub use app::{
    // Configuration
    configure,
    set_on_change,
    // Detection loop
    start_session,
    stop_session,
    classify_landmarks,
    is_running,
    toggle_camera,
    get_debug_overlay_text,
    // Input buffer
    get_input_text,
    set_input_text,
    reset_input,
    get_detected_gesture,
    get_detected_confidence,
    // Chat
    connect,
    disconnect,
    connection_state,
    send_message,
    get_messages,
    get_role_messages,
    get_local_role,
};

pub use detector::JsHandDetector;
pub use socket::{Offline, WebSocketChannel};
pub use video::{CanvasOverlay, VideoCapture, VideoFrame};
