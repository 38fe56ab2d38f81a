//! Launch-screen timing for app startup.
//!
//! What gets drawn while the branded screen is up belongs to the shell;
//! this module only times the hold and flips the launched flag exactly
//! once when it elapses. The hold runs on the runtime alongside normal
//! startup work and never blocks the caller.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// How long the launch screen stays up before the app proceeds.
pub const LAUNCH_HOLD: Duration = Duration::from_secs(2);

/// Times the launch hold and signals completion.
pub struct LaunchPresenter {
    hold: Duration,
}

impl LaunchPresenter {
    /// Presenter with the standard hold.
    pub fn new() -> Self {
        Self { hold: LAUNCH_HOLD }
    }

    /// Presenter with a custom hold.
    pub fn with_hold(hold: Duration) -> Self {
        Self { hold }
    }

    /// Start the hold.
    ///
    /// The returned handle observes the launched flag, which transitions
    /// from false to true exactly once, when the hold elapses. Dropping
    /// the handle tears the pending hold down; a torn-down hold never
    /// fires completion.
    pub fn present(&self) -> LaunchHandle {
        let (tx, rx) = watch::channel(false);
        let hold = self.hold;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(hold).await;
            let _ = tx.send(true);
        });

        LaunchHandle {
            launched: rx,
            timer,
        }
    }
}

impl Default for LaunchPresenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a presented launch screen.
pub struct LaunchHandle {
    launched: watch::Receiver<bool>,
    timer: JoinHandle<()>,
}

impl LaunchHandle {
    /// Whether the hold has elapsed.
    pub fn launched(&self) -> bool {
        *self.launched.borrow()
    }

    /// Observe the launched flag alongside other subscribers.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.launched.clone()
    }

    /// Suspend until the hold elapses.
    ///
    /// Returns true once launched, false only if the hold was torn down
    /// before completing.
    pub async fn wait(&mut self) -> bool {
        self.launched.wait_for(|launched| *launched).await.is_ok()
    }
}

impl Drop for LaunchHandle {
    fn drop(&mut self) {
        self.timer.abort();
    }
}
