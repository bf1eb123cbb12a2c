//! Shared test doubles.

#![allow(dead_code)]

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use replpad::{
    ConnectionManager, Endpoint, Error, Remote, RemoteContext, Result, Signal, SocketId, Timer,
    Transport, UiSink,
};
use serde_json::Value;

// ============================================================================
// Constants
// ============================================================================

pub const TEST_ENDPOINT: &str = "127.0.0.1:8000/socket";

pub const TEST_DELAY: Duration = Duration::from_millis(3_000);

// ============================================================================
// MockTransport
// ============================================================================

/// Calls made on a [`MockTransport`], in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Connect(SocketId),
    Send(SocketId, String),
    Detach(SocketId),
    Close(SocketId),
}

/// Transport that records calls instead of doing I/O.
#[derive(Debug, Default)]
pub struct MockTransport {
    next: u64,
    pub ops: Vec<Op>,
}

impl MockTransport {
    pub fn connects(&self) -> Vec<SocketId> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Connect(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    pub fn frames(&self) -> Vec<(SocketId, String)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Send(id, frame) => Some((*id, frame.clone())),
                _ => None,
            })
            .collect()
    }

    fn is_detached(&self, socket: SocketId) -> bool {
        self.ops.contains(&Op::Detach(socket))
    }
}

impl Transport for MockTransport {
    fn connect(&mut self, _endpoint: &Endpoint) -> SocketId {
        self.next += 1;
        let id = SocketId::new(self.next);
        self.ops.push(Op::Connect(id));
        id
    }

    fn send(&mut self, socket: SocketId, frame: String) -> Result<()> {
        if self.is_detached(socket) {
            return Err(Error::ConnectionClosed);
        }
        self.ops.push(Op::Send(socket, frame));
        Ok(())
    }

    fn detach(&mut self, socket: SocketId) {
        self.ops.push(Op::Detach(socket));
    }

    fn close(&mut self, socket: SocketId) {
        self.ops.push(Op::Close(socket));
    }
}

// ============================================================================
// MockTimer
// ============================================================================

/// Timer that records schedules; tests fire it by hand.
#[derive(Debug, Default)]
pub struct MockTimer {
    pub scheduled: Vec<Duration>,
    pub cancelled: usize,
}

impl Timer for MockTimer {
    fn schedule(&mut self, delay: Duration) {
        self.scheduled.push(delay);
    }

    fn cancel(&mut self) {
        self.cancelled += 1;
    }
}

// ============================================================================
// RecordingSink
// ============================================================================

/// Sink that keeps every signal for later inspection.
#[derive(Debug, Default)]
pub struct RecordingSink {
    signals: Mutex<Vec<Signal>>,
}

impl RecordingSink {
    pub fn signals(&self) -> Vec<Signal> {
        self.signals.lock().clone()
    }

    pub fn connectivity(&self) -> Vec<bool> {
        self.signals
            .lock()
            .iter()
            .filter_map(|s| match s {
                Signal::ConnectivityChanged(c) => Some(*c),
                _ => None,
            })
            .collect()
    }

    pub fn displays(&self) -> Vec<Value> {
        self.signals
            .lock()
            .iter()
            .filter_map(|s| match s {
                Signal::DisplayReceived(v) => Some(v.clone()),
                _ => None,
            })
            .collect()
    }
}

impl UiSink for RecordingSink {
    fn connectivity_changed(&self, connected: bool) {
        self.signals.lock().push(Signal::ConnectivityChanged(connected));
    }

    fn display_received(&self, payload: Value) {
        self.signals.lock().push(Signal::DisplayReceived(payload));
    }

    fn buttons_changed(&self) {
        self.signals.lock().push(Signal::ButtonsChanged);
    }
}

// ============================================================================
// Helpers
// ============================================================================

pub type TestManager = ConnectionManager<MockTransport, MockTimer>;

pub fn context(sink: Arc<RecordingSink>) -> Arc<RemoteContext> {
    let remote = Remote::builder()
        .endpoint(TEST_ENDPOINT)
        .reconnect_delay(TEST_DELAY)
        .sink(sink)
        .build()
        .expect("test configuration is valid");
    Arc::clone(remote.context())
}

pub fn manager() -> (TestManager, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let manager = ConnectionManager::new(
        context(Arc::clone(&sink)),
        MockTransport::default(),
        MockTimer::default(),
    );
    (manager, sink)
}

/// Returns the id of the socket the manager currently owns.
pub fn current(manager: &TestManager) -> SocketId {
    manager
        .connection()
        .socket()
        .expect("manager should own a socket")
}
