//! Application state shared by the detection loop and the chat bridge
//!
//! Owned by the top-level app and handed to the detection loop as
//! `Rc<RefCell<SessionState>>`. The loop only ever appends to the input
//! buffer; clearing it is a user action.

use log::{debug, warn};

use crate::error::ChannelError;
use crate::gesture::DetectedGesture;

use super::channel::{ConnectionState, MessageChannel};
use super::chat::{ChatHistory, Role};
use super::config::SessionConfig;

/// Result of [`SessionState::send_message`]
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// Input was empty or whitespace; nothing happened
    Empty,
    Sent,
    /// Recorded locally but the channel refused it
    Dropped(ChannelError),
}

#[derive(Debug)]
pub struct SessionState {
    local_role: Role,
    input_text: String,
    detected: Option<DetectedGesture>,
    history: ChatHistory,
    connection: ConnectionState,
    camera_enabled: bool,
}

impl SessionState {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            local_role: config.local_role,
            input_text: String::new(),
            detected: None,
            history: ChatHistory::new(config.coalesce_consecutive),
            connection: ConnectionState::Closed,
            camera_enabled: true,
        }
    }

    /// Apply a new configuration. Role and coalescing change what the
    /// history means, so input, detection and history start over; the
    /// connection and camera setting belong to the page and are kept.
    pub fn reconfigure(&mut self, config: &SessionConfig) {
        *self = Self {
            connection: self.connection,
            camera_enabled: self.camera_enabled,
            ..Self::new(config)
        };
    }

    // ========================================================================
    // DETECTION OUTPUT
    // ========================================================================

    /// Append the recognized letter and publish it as the current gesture
    pub fn apply_detection(&mut self, gesture: DetectedGesture) {
        self.input_text.push_str(gesture.name);
        self.detected = Some(gesture);
    }

    pub fn detected_gesture(&self) -> Option<&DetectedGesture> {
        self.detected.as_ref()
    }

    // ========================================================================
    // INPUT BUFFER
    // ========================================================================

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    /// Manual edit from the input box
    pub fn set_input_text(&mut self, text: &str) {
        self.input_text = text.to_string();
    }

    pub fn reset_input(&mut self) {
        self.input_text.clear();
    }

    // ========================================================================
    // CHAT
    // ========================================================================

    /// Send the input buffer to the peer and clear it.
    ///
    /// A channel failure is not fatal: the message stays in the history
    /// marked undelivered.
    pub fn send_message(&mut self, channel: &impl MessageChannel) -> SendOutcome {
        let text = self.input_text.trim().to_string();
        if text.is_empty() {
            return SendOutcome::Empty;
        }

        let outcome = match channel.send(&text) {
            Ok(()) => SendOutcome::Sent,
            Err(err) => {
                warn!("message dropped: {}", err);
                SendOutcome::Dropped(err)
            }
        };

        let delivered = outcome == SendOutcome::Sent;
        self.history.push(self.local_role, &text, delivered);
        self.input_text.clear();
        outcome
    }

    /// Inbound `{ text }` payload from the peer
    pub fn receive_message(&mut self, text: &str) {
        if text.is_empty() {
            debug!("ignoring empty inbound message");
            return;
        }
        self.history.push(self.local_role.peer(), text, true);
    }

    pub fn history(&self) -> &ChatHistory {
        &self.history
    }

    pub fn local_role(&self) -> Role {
        self.local_role
    }

    // ========================================================================
    // CONNECTION / CAMERA
    // ========================================================================

    pub fn connection_state(&self) -> ConnectionState {
        self.connection
    }

    pub fn set_connection_state(&mut self, state: ConnectionState) {
        self.connection = state;
    }

    pub fn camera_enabled(&self) -> bool {
        self.camera_enabled
    }

    /// Flip the camera; returns the new setting
    pub fn toggle_camera(&mut self) -> bool {
        self.camera_enabled = !self.camera_enabled;
        self.camera_enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct RecordingChannel {
        sent: RefCell<Vec<String>>,
        state: ConnectionState,
    }

    impl RecordingChannel {
        fn open() -> Self {
            Self {
                sent: RefCell::new(Vec::new()),
                state: ConnectionState::Open,
            }
        }

        fn closed() -> Self {
            Self {
                sent: RefCell::new(Vec::new()),
                state: ConnectionState::Closed,
            }
        }
    }

    impl MessageChannel for RecordingChannel {
        fn send(&self, text: &str) -> Result<(), ChannelError> {
            if self.state != ConnectionState::Open {
                return Err(ChannelError::Disconnected);
            }
            self.sent.borrow_mut().push(text.to_string());
            Ok(())
        }

        fn state(&self) -> ConnectionState {
            self.state
        }
    }

    fn letter(name: &'static str) -> DetectedGesture {
        DetectedGesture { name, confidence: 7.0 }
    }

    #[test]
    fn test_detections_append_letters() {
        let mut state = SessionState::new(&SessionConfig::default());
        state.apply_detection(letter("H"));
        state.apply_detection(letter("I"));
        assert_eq!(state.input_text(), "HI");
        assert_eq!(state.detected_gesture().map(|g| g.name), Some("I"));
    }

    #[test]
    fn test_reset_clears_only_input() {
        let mut state = SessionState::new(&SessionConfig::default());
        state.apply_detection(letter("A"));
        state.reset_input();
        assert_eq!(state.input_text(), "");
        assert_eq!(state.detected_gesture().map(|g| g.name), Some("A"));
    }

    #[test]
    fn test_send_records_and_clears() {
        let channel = RecordingChannel::open();
        let mut state = SessionState::new(&SessionConfig::default());
        state.set_input_text("  HELLO ");

        assert_eq!(state.send_message(&channel), SendOutcome::Sent);
        assert_eq!(*channel.sent.borrow(), vec!["HELLO".to_string()]);
        assert_eq!(state.history().lines(), vec!["Student: HELLO"]);
        assert_eq!(state.input_text(), "");
    }

    #[test]
    fn test_blank_input_is_not_sent() {
        let channel = RecordingChannel::open();
        let mut state = SessionState::new(&SessionConfig::default());
        state.set_input_text("   ");

        assert_eq!(state.send_message(&channel), SendOutcome::Empty);
        assert!(channel.sent.borrow().is_empty());
        assert!(state.history().is_empty());
        assert_eq!(state.input_text(), "   ");
    }

    #[test]
    fn test_send_while_disconnected_is_dropped_not_fatal() {
        let channel = RecordingChannel::closed();
        let mut state = SessionState::new(&SessionConfig::default());
        state.set_input_text("ABC");

        assert_eq!(
            state.send_message(&channel),
            SendOutcome::Dropped(ChannelError::Disconnected)
        );
        assert_eq!(state.history().len(), 1);
        assert!(!state.history().messages()[0].delivered);
        assert_eq!(channel.state(), ConnectionState::Closed);
    }

    #[test]
    fn test_inbound_uses_peer_role() {
        let config = SessionConfig {
            local_role: Role::Teacher,
            ..SessionConfig::default()
        };
        let mut state = SessionState::new(&config);
        state.receive_message("CAT");
        state.receive_message("");
        assert_eq!(state.history().lines(), vec!["Student: CAT"]);
    }

    #[test]
    fn test_reconfigure_keeps_camera_and_connection() {
        let mut state = SessionState::new(&SessionConfig::default());
        state.toggle_camera();
        state.set_connection_state(ConnectionState::Open);
        state.apply_detection(letter("A"));
        state.receive_message("hi");

        let config = SessionConfig {
            local_role: Role::Teacher,
            ..SessionConfig::default()
        };
        state.reconfigure(&config);

        assert!(!state.camera_enabled());
        assert_eq!(state.connection_state(), ConnectionState::Open);
        assert_eq!(state.local_role(), Role::Teacher);
        assert_eq!(state.input_text(), "");
        assert!(state.detected_gesture().is_none());
        assert!(state.history().is_empty());
    }

    #[test]
    fn test_camera_toggle() {
        let mut state = SessionState::new(&SessionConfig::default());
        assert!(state.camera_enabled());
        assert!(!state.toggle_camera());
        assert!(state.toggle_camera());
    }
}
