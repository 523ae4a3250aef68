//! Cancelable repeating background task.

use std::future::Future;
use std::ops::ControlFlow;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Owned handle to a polling loop.
///
/// The loop ends when the tick function returns `ControlFlow::Break`, when
/// [`cancel`](Self::cancel) is called, or when the handle is dropped.
pub struct PollHandle {
    token: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl PollHandle {
    /// Spawn a loop that calls `tick` every `period`, first one `period`
    /// after spawning. A tick in flight when the handle is cancelled is
    /// abandoned at its next await point.
    pub fn spawn<F, Fut>(name: &'static str, period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ControlFlow<()>> + Send + 'static,
    {
        let token = CancellationToken::new();
        let cancel = token.clone();

        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            tracing::debug!(poller = name, period_ms = period.as_millis() as u64, "Poller started");

            loop {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    _ = interval.tick() => {}
                }

                let flow = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    flow = tick() => flow,
                };

                if flow.is_break() {
                    break;
                }
            }

            tracing::debug!(poller = name, "Poller stopped");
        });

        Self {
            token,
            handle: Some(handle),
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// True once the loop has exited, for whatever reason.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Wait for the loop to exit on its own.
    pub async fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "Poller task failed");
            }
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
