//! Connection manager state machine against scripted transport events.

mod common;

use common::{Op, TEST_DELAY, current, manager};
use replpad::{ConnectionState, Error, TransportEvent};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};

// ============================================================================
// Start
// ============================================================================

#[test]
fn test_start_issues_one_connect() {
    let (mut manager, sink) = manager();

    manager.start();

    assert_eq!(manager.state(), ConnectionState::Connecting);
    assert_eq!(manager.connection().transport().connects().len(), 1);
    assert!(manager.timer().scheduled.is_empty());
    assert!(sink.signals().is_empty());
}

#[test]
fn test_start_twice_does_not_overlap() {
    let (mut manager, _sink) = manager();

    manager.start();
    manager.start();

    assert_eq!(manager.attempts(), 1);
}

// ============================================================================
// Open / Handshake
// ============================================================================

#[test]
fn test_open_connects_and_sends_handshake() {
    let (mut manager, sink) = manager();
    manager.start();
    let socket = current(&manager);

    manager.handle_event(TransportEvent::opened(socket));

    assert_eq!(manager.state(), ConnectionState::Connected);
    assert_eq!(sink.connectivity(), vec![true]);
    assert_eq!(
        manager.connection().transport().frames(),
        vec![(socket, "{}".to_string())]
    );
}

#[test]
fn test_handshake_precedes_commands() {
    let (mut manager, _sink) = manager();
    manager.start();
    let socket = current(&manager);

    manager.handle_event(TransportEvent::opened(socket));
    assert_ok!(manager.execute("(next-buffer)"));
    assert_ok!(manager.execute("(previous-buffer)"));

    let frames = manager.connection().transport().frames();
    assert_eq!(frames[0].1, "{}");
    assert_eq!(frames[1].1, r#"{"code":"(next-buffer)"}"#);
    assert_eq!(frames[2].1, r#"{"code":"(previous-buffer)"}"#);
    assert_eq!(frames.iter().filter(|(_, f)| f == "{}").count(), 1);
}

#[test]
fn test_handshake_once_per_connection() {
    let (mut manager, _sink) = manager();
    manager.start();

    let first = current(&manager);
    manager.handle_event(TransportEvent::opened(first));
    manager.handle_event(TransportEvent::closed(first, None));
    manager.reconnect_due();

    let second = current(&manager);
    manager.handle_event(TransportEvent::opened(second));

    assert_eq!(
        manager.connection().transport().frames(),
        vec![(first, "{}".to_string()), (second, "{}".to_string())]
    );
}

// ============================================================================
// Execute
// ============================================================================

#[test]
fn test_execute_before_open_is_not_connected() {
    let (mut manager, _sink) = manager();

    assert!(matches!(manager.execute("(undo)"), Err(Error::NotConnected)));

    manager.start();
    assert!(matches!(manager.execute("(undo)"), Err(Error::NotConnected)));
    assert!(manager.connection().transport().frames().is_empty());
}

#[test]
fn test_execute_after_close_is_not_connected() {
    let (mut manager, _sink) = manager();
    manager.start();
    let socket = current(&manager);
    manager.handle_event(TransportEvent::opened(socket));
    manager.handle_event(TransportEvent::closed(socket, Some("bye".into())));

    let err = assert_err!(manager.execute("(undo)"));
    assert!(matches!(err, Error::NotConnected));
    assert!(err.is_recoverable());
}

// ============================================================================
// Close / Reconnect
// ============================================================================

#[test]
fn test_close_schedules_one_reconnect() {
    let (mut manager, sink) = manager();
    manager.start();
    let socket = current(&manager);
    manager.handle_event(TransportEvent::opened(socket));

    manager.handle_event(TransportEvent::closed(socket, None));

    assert_eq!(manager.state(), ConnectionState::Disconnected);
    assert_eq!(sink.connectivity(), vec![true, false]);
    assert_eq!(manager.timer().scheduled, vec![TEST_DELAY]);
    assert!(manager.reconnect_pending());
    assert_eq!(manager.attempts(), 1);

    manager.reconnect_due();

    assert_eq!(manager.attempts(), 2);
    assert_eq!(manager.state(), ConnectionState::Connecting);
    assert!(!manager.reconnect_pending());
}

#[test]
fn test_old_socket_detached_before_new_connect() {
    let (mut manager, _sink) = manager();
    manager.start();
    let first = current(&manager);
    manager.handle_event(TransportEvent::closed(first, Some("refused".into())));
    manager.reconnect_due();
    let second = current(&manager);

    assert_eq!(
        manager.connection().transport().ops,
        vec![Op::Connect(first), Op::Detach(first), Op::Connect(second)]
    );
}

#[test]
fn test_failed_connects_retry_forever() {
    let (mut manager, sink) = manager();
    manager.start();

    const CLOSES: usize = 25;
    for _ in 0..CLOSES {
        let socket = current(&manager);
        manager.handle_event(TransportEvent::closed(socket, Some("refused".into())));

        assert_eq!(manager.state(), ConnectionState::Disconnected);
        assert!(manager.reconnect_pending());

        manager.reconnect_due();
        assert_eq!(manager.state(), ConnectionState::Connecting);
    }

    assert_eq!(manager.timer().scheduled.len(), CLOSES);
    assert!(manager.timer().scheduled.iter().all(|d| *d == TEST_DELAY));
    assert_eq!(manager.attempts(), CLOSES as u64 + 1);
    assert_eq!(sink.connectivity(), vec![false; CLOSES]);
}

#[test]
fn test_duplicate_close_keeps_single_timer() {
    let (mut manager, _sink) = manager();
    manager.start();
    let socket = current(&manager);

    manager.handle_event(TransportEvent::closed(socket, None));
    manager.handle_event(TransportEvent::closed(socket, None));

    assert_eq!(manager.timer().scheduled.len(), 1);

    manager.reconnect_due();
    manager.reconnect_due();
    assert_eq!(manager.attempts(), 2);
}

#[test]
fn test_spurious_timer_is_ignored() {
    let (mut manager, _sink) = manager();
    manager.start();

    manager.reconnect_due();

    assert_eq!(manager.attempts(), 1);
}

#[test]
fn test_stale_socket_events_are_ignored() {
    let (mut manager, sink) = manager();
    manager.start();
    let first = current(&manager);
    manager.handle_event(TransportEvent::closed(first, None));
    manager.reconnect_due();

    manager.handle_event(TransportEvent::opened(first));
    manager.handle_event(TransportEvent::message(first, r#"{"late":true}"#));
    manager.handle_event(TransportEvent::closed(first, None));

    assert_eq!(manager.state(), ConnectionState::Connecting);
    assert!(!manager.reconnect_pending());
    assert!(manager.connection().transport().frames().is_empty());
    assert!(sink.displays().is_empty());
    assert_eq!(sink.connectivity(), vec![false]);
}

// ============================================================================
// Inbound
// ============================================================================

#[test]
fn test_inbound_payload_reaches_display() {
    let (mut manager, sink) = manager();
    manager.start();
    let socket = current(&manager);
    manager.handle_event(TransportEvent::opened(socket));

    manager.handle_event(TransportEvent::message(
        socket,
        r#"{"buffer":"*scratch*","text":"hello"}"#,
    ));

    assert_eq!(
        sink.displays(),
        vec![json!({"buffer": "*scratch*", "text": "hello"})]
    );
}

#[test]
fn test_malformed_inbound_keeps_connection() {
    let (mut manager, sink) = manager();
    manager.start();
    let socket = current(&manager);
    manager.handle_event(TransportEvent::opened(socket));

    manager.handle_event(TransportEvent::message(socket, "{\"unterminated"));
    manager.handle_event(TransportEvent::message(socket, "[1,2,3]"));

    assert_eq!(manager.state(), ConnectionState::Connected);
    assert_eq!(sink.displays(), vec![json!([1, 2, 3])]);
    assert!(manager.timer().scheduled.is_empty());
}

// ============================================================================
// Shutdown
// ============================================================================

#[test]
fn test_shutdown_releases_socket_and_stops_reconnecting() {
    let (mut manager, sink) = manager();
    manager.start();
    let socket = current(&manager);
    manager.handle_event(TransportEvent::opened(socket));

    manager.shutdown();

    assert_eq!(manager.state(), ConnectionState::Disconnected);
    assert_eq!(sink.connectivity(), vec![true, false]);
    assert_eq!(manager.timer().cancelled, 1);

    let ops = &manager.connection().transport().ops;
    assert!(ops.ends_with(&[Op::Close(socket), Op::Detach(socket)]));

    manager.handle_event(TransportEvent::closed(socket, None));
    manager.reconnect_due();
    manager.start();

    assert_eq!(manager.attempts(), 1);
    assert!(manager.timer().scheduled.is_empty());
}

#[test]
fn test_shutdown_with_pending_reconnect() {
    let (mut manager, _sink) = manager();
    manager.start();
    let socket = current(&manager);
    manager.handle_event(TransportEvent::closed(socket, None));

    manager.shutdown();
    manager.reconnect_due();

    assert!(!manager.reconnect_pending());
    assert_eq!(manager.attempts(), 1);
}
