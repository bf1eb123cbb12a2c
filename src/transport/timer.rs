//! Reconnect timer.

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::trace;

use super::Timer;

// ============================================================================
// ReconnectDue
// ============================================================================

/// Expiry notice delivered when a scheduled delay has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectDue;

// ============================================================================
// TokioTimer
// ============================================================================

/// [`Timer`] that sleeps on the tokio clock and reports expiry on a channel.
pub struct TokioTimer {
    /// Sender for expiry notices.
    due: mpsc::UnboundedSender<ReconnectDue>,
    /// Sleeping task, if armed.
    pending: Option<JoinHandle<()>>,
}

impl TokioTimer {
    /// Creates a timer and the receiver its expiries arrive on.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ReconnectDue>) {
        let (due, due_rx) = mpsc::unbounded_channel();
        (Self { due, pending: None }, due_rx)
    }

    /// Returns `true` while a sleep is in flight.
    #[inline]
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

impl Timer for TokioTimer {
    fn schedule(&mut self, delay: Duration) {
        self.cancel();

        let due = self.due.clone();
        self.pending = Some(tokio::spawn(async move {
            sleep(delay).await;
            let _ = due.send(ReconnectDue);
        }));
        trace!(?delay, "Reconnect timer armed");
    }

    fn cancel(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }
}

impl Drop for TokioTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::time::advance;

    #[tokio::test(start_paused = true)]
    async fn test_fires_once_after_delay() {
        let (mut timer, mut due) = TokioTimer::new();
        timer.schedule(Duration::from_secs(3));
        tokio::task::yield_now().await;

        advance(Duration::from_millis(2_900)).await;
        assert!(due.try_recv().is_err());

        advance(Duration::from_millis(200)).await;
        assert_eq!(due.recv().await, Some(ReconnectDue));
        assert!(due.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_expiry() {
        let (mut timer, mut due) = TokioTimer::new();
        timer.schedule(Duration::from_secs(1));
        timer.cancel();

        advance(Duration::from_secs(5)).await;
        tokio::task::yield_now().await;
        assert!(due.try_recv().is_err());
        assert!(!timer.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_replaces_pending_sleep() {
        let (mut timer, mut due) = TokioTimer::new();
        timer.schedule(Duration::from_secs(1));
        timer.schedule(Duration::from_secs(1));
        tokio::task::yield_now().await;

        advance(Duration::from_secs(2)).await;
        assert_eq!(due.recv().await, Some(ReconnectDue));
        tokio::task::yield_now().await;
        assert!(due.try_recv().is_err());
    }
}
