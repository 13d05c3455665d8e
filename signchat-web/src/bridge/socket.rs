//! WebSocket transport between the teacher and student pages
//!
//! Incoming text frames go straight into the session history. The socket
//! is never reopened automatically; JS calls `connect()` again if it wants
//! a new connection.

use std::cell::RefCell;
use std::rc::Rc;

use log::{info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, Event, MessageEvent, WebSocket};

use crate::error::{describe_js, ChannelError};
use crate::session::{ConnectionState, MessageChannel, SessionState};

type Listener<E> = Closure<dyn FnMut(E)>;

pub struct WebSocketChannel {
    socket: WebSocket,
    _on_open: Listener<Event>,
    _on_message: Listener<MessageEvent>,
    _on_close: Listener<CloseEvent>,
    _on_error: Listener<Event>,
}

impl WebSocketChannel {
    /// Open the socket. `on_update` runs after every state or history change.
    pub fn connect(
        url: &str,
        session: Rc<RefCell<SessionState>>,
        on_update: Rc<dyn Fn()>,
    ) -> Result<Self, ChannelError> {
        let socket = WebSocket::new(url).map_err(|e| ChannelError::Connect(describe_js(&e)))?;
        session.borrow_mut().set_connection_state(ConnectionState::Connecting);

        let on_open = {
            let session = Rc::clone(&session);
            let on_update = Rc::clone(&on_update);
            Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                info!("channel open");
                session.borrow_mut().set_connection_state(ConnectionState::Open);
                on_update();
            })
        };

        let on_message = {
            let session = Rc::clone(&session);
            let on_update = Rc::clone(&on_update);
            Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
                match event.data().as_string() {
                    Some(text) => {
                        session.borrow_mut().receive_message(&text);
                        on_update();
                    }
                    None => warn!("ignoring non-text channel message"),
                }
            })
        };

        let on_close = {
            let session = Rc::clone(&session);
            let on_update = Rc::clone(&on_update);
            Closure::<dyn FnMut(CloseEvent)>::new(move |event: CloseEvent| {
                info!("channel closed (code {})", event.code());
                session.borrow_mut().set_connection_state(ConnectionState::Closed);
                on_update();
            })
        };

        let on_error = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            warn!("channel error");
        });

        socket.set_onopen(Some(on_open.as_ref().unchecked_ref()));
        socket.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
        socket.set_onclose(Some(on_close.as_ref().unchecked_ref()));
        socket.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        Ok(Self {
            socket,
            _on_open: on_open,
            _on_message: on_message,
            _on_close: on_close,
            _on_error: on_error,
        })
    }
}

impl MessageChannel for WebSocketChannel {
    fn send(&self, text: &str) -> Result<(), ChannelError> {
        if self.state() != ConnectionState::Open {
            return Err(ChannelError::Disconnected);
        }
        self.socket
            .send_with_str(text)
            .map_err(|e| ChannelError::Send(describe_js(&e)))
    }

    fn state(&self) -> ConnectionState {
        match self.socket.ready_state() {
            WebSocket::CONNECTING => ConnectionState::Connecting,
            WebSocket::OPEN => ConnectionState::Open,
            _ => ConnectionState::Closed,
        }
    }
}

impl Drop for WebSocketChannel {
    /// Detach listeners before the closures are freed, then close
    fn drop(&mut self) {
        self.socket.set_onopen(None);
        self.socket.set_onmessage(None);
        self.socket.set_onclose(None);
        self.socket.set_onerror(None);
        if let Err(e) = self.socket.close() {
            warn!("channel close failed: {}", describe_js(&e));
        }
    }
}

/// Stand-in used when no socket has been opened
pub struct Offline;

impl MessageChannel for Offline {
    fn send(&self, _text: &str) -> Result<(), ChannelError> {
        Err(ChannelError::Disconnected)
    }

    fn state(&self) -> ConnectionState {
        ConnectionState::Closed
    }
}
