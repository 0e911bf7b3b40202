//! One-shot timers
//!
//! Provides scheduled callbacks that can be cancelled before they fire.

use std::time::Duration;

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// A timer handle that can be used to cancel a timer
#[derive(Debug, Clone, Default)]
pub struct TimerHandle {
    token: CancellationToken,
}

impl TimerHandle {
    /// Create a new timer handle
    fn new() -> Self {
        Self { token: CancellationToken::new() }
    }

    /// Cancel the timer. Cancelling an already fired or cancelled timer is a
    /// no-op.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Check if the timer has been cancelled
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Run `callback` once after `duration` unless the returned handle is
/// cancelled first.
///
/// Must be called from within a tokio runtime.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
///
/// use rota_common::time::timer::timeout;
///
/// #[tokio::main]
/// async fn main() {
///     let handle = timeout(Duration::from_secs(5), || {
///         tracing::info!("Timeout!");
///     });
///     handle.cancel();
/// }
/// ```
pub fn timeout<F>(duration: Duration, callback: F) -> TimerHandle
where
    F: FnOnce() + Send + 'static,
{
    let handle = TimerHandle::new();
    let token = handle.token.clone();

    tokio::spawn(async move {
        tokio::select! {
            biased;
            () = token.cancelled() => {
                trace!(?duration, "timer cancelled");
            }
            () = sleep(duration) => {
                if !token.is_cancelled() {
                    callback();
                }
            }
        }
    });

    handle
}
