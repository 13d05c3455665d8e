//! SignChat Web - fingerspelling recognizer and teacher/student chat
//!
//! Entry point for WASM module. Only contains:
//! - Module declarations
//! - wasm_bindgen entry points that delegate to submodules
//!
//! The gesture, session and scheduler modules are plain Rust and can be
//! driven without a browser; `bridge` wires them to the DOM.

pub mod error;
pub mod gesture;
pub mod scheduler;
pub mod session;

mod bridge;

use wasm_bindgen::prelude::*;

// Re-export wasm_bindgen functions for JS access
pub use bridge::{
    classify_landmarks, configure, connect, connection_state, disconnect, get_debug_overlay_text,
    get_detected_confidence, get_detected_gesture, get_input_text, get_local_role, get_messages,
    get_role_messages, is_running, reset_input, send_message, set_input_text, set_on_change,
    start_session, stop_session, toggle_camera,
};
pub use bridge::{CanvasOverlay, JsHandDetector, Offline, VideoCapture, VideoFrame, WebSocketChannel};

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        // Logger already installed (module re-instantiated)
        return;
    }
    log::info!("✅ SignChat ready");
}
