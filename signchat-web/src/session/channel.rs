//! Outbound side of the teacher/student channel

use crate::error::ChannelError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Closed,
}

impl ConnectionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionState::Connecting => "connecting",
            ConnectionState::Open => "open",
            ConnectionState::Closed => "closed",
        }
    }
}

/// Text transport to the peer role.
///
/// Inbound messages arrive separately through
/// [`SessionState::receive_message`](super::SessionState::receive_message).
pub trait MessageChannel {
    fn send(&self, text: &str) -> Result<(), ChannelError>;

    fn state(&self) -> ConnectionState;
}
