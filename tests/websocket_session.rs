//! End-to-end sessions against a local WebSocket server.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use futures_util::{SinkExt, StreamExt};
use replpad::{ChannelSink, Error, Preset, Remote, RemoteHandle, Signal};
use serde_json::{Value, json};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{WebSocketStream, accept_async};

const WAIT: Duration = Duration::from_secs(5);
const RECONNECT_DELAY: Duration = Duration::from_millis(50);

// ============================================================================
// Helpers
// ============================================================================

struct Session {
    listener: TcpListener,
    handle: RemoteHandle,
    remote: Remote,
    signals: UnboundedReceiver<Signal>,
}

async fn session() -> Result<Session> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();

    let (sink, signals) = ChannelSink::new();
    let remote = Remote::builder()
        .endpoint(format!("127.0.0.1:{port}/socket"))
        .reconnect_delay(RECONNECT_DELAY)
        .sink(Arc::new(sink))
        .build()?;
    let handle = remote.spawn()?;

    Ok(Session {
        listener,
        handle,
        remote,
        signals,
    })
}

async fn accept(listener: &TcpListener) -> Result<WebSocketStream<TcpStream>> {
    let (stream, _addr) = timeout(WAIT, listener.accept())
        .await
        .context("client did not connect")??;
    Ok(accept_async(stream).await?)
}

async fn next_text(server: &mut WebSocketStream<TcpStream>) -> Result<String> {
    loop {
        let message = timeout(WAIT, server.next())
            .await
            .context("no frame from client")?
            .context("client hung up")??;

        match message {
            Message::Text(text) => return Ok(text.as_str().to_owned()),
            Message::Close(_) => bail!("client closed the socket"),
            _ => {}
        }
    }
}

async fn next_display(signals: &mut UnboundedReceiver<Signal>) -> Result<Value> {
    loop {
        let signal = timeout(WAIT, signals.recv())
            .await
            .context("no signal")?
            .context("signal channel closed")?;

        if let Signal::DisplayReceived(payload) = signal {
            return Ok(payload);
        }
    }
}

async fn next_connectivity(signals: &mut UnboundedReceiver<Signal>) -> Result<bool> {
    loop {
        let signal = timeout(WAIT, signals.recv())
            .await
            .context("no signal")?
            .context("signal channel closed")?;

        if let Signal::ConnectivityChanged(connected) = signal {
            return Ok(connected);
        }
    }
}

async fn send_text(server: &mut WebSocketStream<TcpStream>, text: &str) -> Result<()> {
    server.send(Message::Text(text.to_string().into())).await?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_handshake_is_first_frame() -> Result<()> {
    let session = session().await?;
    let mut server = accept(&session.listener).await?;

    timeout(WAIT, session.handle.wait_connected()).await??;
    session.handle.execute("(next-buffer)").await?;

    assert_eq!(next_text(&mut server).await?, "{}");
    let command: Value = serde_json::from_str(&next_text(&mut server).await?)?;
    assert_eq!(command, json!({"code": "(next-buffer)"}));

    session.handle.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn test_press_sends_button_command() -> Result<()> {
    let session = session().await?;
    let mut server = accept(&session.listener).await?;
    assert_eq!(next_text(&mut server).await?, "{}");

    let mut buttons = session.remote.button_registry();
    buttons.add_preset(Preset::MultipleWindows);

    timeout(WAIT, session.handle.wait_connected()).await??;
    session.handle.press(&buttons, 3).await?;

    let command: Value = serde_json::from_str(&next_text(&mut server).await?)?;
    assert_eq!(command, json!({"code": "(split-window nil nil t)"}));

    let missing = session.handle.press(&buttons, 42).await;
    assert!(matches!(missing, Err(Error::ButtonNotFound { index: 42 })));

    session.handle.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn test_display_payloads_survive_malformed_frames() -> Result<()> {
    let mut session = session().await?;
    let mut server = accept(&session.listener).await?;
    assert_eq!(next_text(&mut server).await?, "{}");

    send_text(&mut server, "this is not json").await?;
    send_text(&mut server, r#"{"buffer":"main.rs","line":12}"#).await?;

    let payload = next_display(&mut session.signals).await?;
    assert_eq!(payload, json!({"buffer": "main.rs", "line": 12}));
    assert!(session.handle.is_connected());

    session.handle.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn test_reconnects_after_server_close() -> Result<()> {
    let mut session = session().await?;

    let mut server = accept(&session.listener).await?;
    assert_eq!(next_text(&mut server).await?, "{}");
    assert!(next_connectivity(&mut session.signals).await?);

    server.close(None).await?;
    drop(server);
    assert!(!next_connectivity(&mut session.signals).await?);

    let mut server = accept(&session.listener).await?;
    assert_eq!(next_text(&mut server).await?, "{}");
    assert!(next_connectivity(&mut session.signals).await?);

    session.handle.execute("(end-of-buffer)").await?;
    let command: Value = serde_json::from_str(&next_text(&mut server).await?)?;
    assert_eq!(command, json!({"code": "(end-of-buffer)"}));

    session.handle.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn test_remote_close_is_acknowledged() -> Result<()> {
    let mut session = session().await?;
    let mut server = accept(&session.listener).await?;
    assert_eq!(next_text(&mut server).await?, "{}");
    assert!(next_connectivity(&mut session.signals).await?);

    server.close(None).await?;
    let reply = timeout(WAIT, server.next())
        .await
        .context("client never answered the close")?;
    assert!(matches!(reply, Some(Ok(Message::Close(_)))));
    assert!(!next_connectivity(&mut session.signals).await?);

    session.handle.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn test_execute_without_server_is_not_connected() -> Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    drop(listener);

    let remote = Remote::builder()
        .endpoint(format!("127.0.0.1:{port}/socket"))
        .reconnect_delay(RECONNECT_DELAY)
        .build()?;
    let handle = remote.spawn()?;

    let result = handle.execute("(undo)").await;
    assert!(matches!(result, Err(Error::NotConnected)));
    assert!(!handle.is_connected());

    handle.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn test_second_spawn_opens_no_socket() -> Result<()> {
    let session = session().await?;
    let mut server = accept(&session.listener).await?;
    assert_eq!(next_text(&mut server).await?, "{}");

    assert!(matches!(session.remote.spawn(), Err(Error::AlreadySpawned)));
    assert!(matches!(
        session.remote.clone().spawn(),
        Err(Error::AlreadySpawned)
    ));

    let extra = timeout(Duration::from_millis(300), session.listener.accept()).await;
    assert!(extra.is_err(), "only one socket per remote");

    session.handle.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn test_execute_after_shutdown_is_closed() -> Result<()> {
    let session = session().await?;
    session.handle.shutdown().await;
    session.handle.shutdown().await;

    let result = session.handle.execute("(undo)").await;
    assert!(matches!(result, Err(Error::ConnectionClosed)));
    Ok(())
}
