use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::chat::Output;

pub const FRAMES: [&str; 4] = ["-", "\\", "|", "/"];

/// Erases the last frame so whatever is printed next starts clean.
pub const CLEAR: &str = "\r \r";

/// Busy indicator shown while a request is in flight. Each request
/// gets its own spinner which is retired with `stop`.
pub struct Spinner {
    stop_tx: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl Spinner {
    /// Starts drawing immediately. The spinner also ends on its own
    /// if `cancel` fires before `stop` is called.
    pub fn start(output: Output, tick: Duration, cancel: CancellationToken) -> Self {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut frame = 0;

            loop {
                tokio::select! {
                    biased;
                    _ = &mut stop_rx => break,
                    _ = cancel.cancelled() => {
                        tracing::debug!("Spinner cancelled");
                        break;
                    }
                    _ = interval.tick() => {
                        output.print(&format!("\r{}", FRAMES[frame % FRAMES.len()]));
                        frame += 1;
                    }
                }
            }

            output.print(CLEAR);
        });

        Self { stop_tx, handle }
    }

    /// Signals the spinner and waits until it has drawn its last frame.
    pub async fn stop(self) {
        // The task may already be gone if it was cancelled
        let _ = self.stop_tx.send(());
        if let Err(e) = self.handle.await {
            tracing::error!("Spinner task failed: {}", e);
        }
    }
}
