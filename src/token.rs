//! Broadcast one-shot cancellation.
//!
//! Every stage in a pipeline shares one [`CancelToken`]. Closing it is the
//! only way to stop an unbounded producer; stages observe the closure at
//! their next blocking step and unwind, closing their owned outputs.

use std::sync::Arc;
use tokio::sync::watch;

/// A broadcast, one-shot cancellation flag.
///
/// The token transitions open → closed exactly once; the transition is
/// irreversible and visible to every clone without races. There is no
/// payload. Closing an already-closed token is a no-op.
///
/// # Example
///
/// ```rust
/// use weir::CancelToken;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let token = CancelToken::new();
/// assert!(!token.is_cancelled());
///
/// let observer = token.clone();
/// token.cancel();
/// observer.cancelled().await; // resolves immediately
/// assert!(observer.is_cancelled());
/// # });
/// ```
#[derive(Clone, Debug)]
pub struct CancelToken {
    tx: Arc<watch::Sender<bool>>,
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    /// Create a new open token.
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            tx: Arc::new(tx),
            rx,
        }
    }

    /// Close the token, waking every waiter. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// Whether the token has been closed.
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait until the token is closed.
    ///
    /// Resolves immediately if the token is already closed. Safe to race
    /// inside `tokio::select!`.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        // self holds the sender alive, so wait_for cannot fail here.
        let _ = rx.wait_for(|&closed| closed).await;
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}
