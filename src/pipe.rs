//! Typed pipes connecting stages within a pipeline.
//!
//! A pipe is a bounded, ordered, single-consumer conduit with explicit close
//! semantics: the receiver observes `None` once every sender is gone and the
//! channel is drained. This is a thin wrapper around `tokio::sync::mpsc`,
//! providing a consistent API for all stages; its `recv` is cancel-safe and
//! a losing `reserve` in a `tokio::select!` race is guaranteed not to have
//! delivered a value, which the stage combinators rely on.

use crate::error::{Error, Result};
use tokio::sync::mpsc;

/// Default capacity used for the handoff between adjacent stages.
///
/// Capacity 1 is the tightest handoff a bounded tokio channel allows: a
/// producer gets at most one value ahead of its consumer.
pub const HANDOFF_CAPACITY: usize = 1;

/// Constructors for connected sender/receiver pairs.
///
/// # Example
///
/// ```rust
/// use weir::pipe::Pipe;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let (tx, mut rx) = Pipe::bounded(16);
/// tx.send(7u32).await.unwrap();
/// assert_eq!(rx.recv().await, Some(7));
/// # });
/// ```
pub struct Pipe;

impl Pipe {
    /// Create a bounded pipe with the given capacity (minimum 1).
    pub fn bounded<T>(capacity: usize) -> (Sender<T>, Receiver<T>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Sender { inner: tx }, Receiver { inner: rx })
    }

    /// Create a pipe with the default stage handoff capacity.
    pub fn handoff<T>() -> (Sender<T>, Receiver<T>) {
        Self::bounded(HANDOFF_CAPACITY)
    }
}

/// Sending half of a pipe.
///
/// Stages own the sender(s) for their output pipe; dropping the last sender
/// closes the pipe, which is how every stage signals end-of-stream on every
/// exit path.
pub struct Sender<T> {
    inner: mpsc::Sender<T>,
}

impl<T> Clone for Sender<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Sender<T> {
    /// Send a value, waiting for capacity.
    ///
    /// Returns [`Error::Closed`] if the receiver has been dropped. When this
    /// future loses a `tokio::select!` race, the value was not delivered.
    pub async fn send(&self, value: T) -> Result<()> {
        self.inner.send(value).await.map_err(|_| Error::Closed)
    }

    /// Try to send without waiting.
    pub fn try_send(&self, value: T) -> Result<()> {
        match self.inner.try_send(value) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(_)) => Err(Error::Full),
            Err(mpsc::error::TrySendError::Closed(_)) => Err(Error::Closed),
        }
    }

    /// Reserve a slot, committing to the send only once a slot is held.
    ///
    /// Used where one value is raced toward several pipes at once: a
    /// reservation that loses the race holds no value, so the same value can
    /// safely be offered again elsewhere.
    pub async fn reserve(&self) -> Result<SendPermit<'_, T>> {
        match self.inner.reserve().await {
            Ok(permit) => Ok(SendPermit { inner: permit }),
            Err(_) => Err(Error::Closed),
        }
    }

    /// Whether the receiving half has been dropped.
    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }
}

/// A reserved slot in a pipe, obtained from [`Sender::reserve`].
pub struct SendPermit<'a, T> {
    inner: mpsc::Permit<'a, T>,
}

impl<T> SendPermit<'_, T> {
    /// Deliver a value into the reserved slot. Cannot fail or wait.
    pub fn send(self, value: T) {
        self.inner.send(value);
    }
}

/// Receiving half of a pipe.
pub struct Receiver<T> {
    inner: mpsc::Receiver<T>,
}

impl<T> Receiver<T> {
    /// Receive the next value, or `None` once the pipe is closed and drained.
    ///
    /// Cancel-safe: a `recv` that loses a `tokio::select!` race has not
    /// consumed a value.
    pub async fn recv(&mut self) -> Option<T> {
        self.inner.recv().await
    }

    /// Close the receiving half, refusing further sends.
    ///
    /// Values already in the pipe can still be received.
    pub fn close(&mut self) {
        self.inner.close();
    }

    /// Drain the pipe to closure, collecting every value in order.
    pub async fn collect(mut self) -> Vec<T> {
        let mut values = Vec::new();
        while let Some(value) = self.recv().await {
            values.push(value);
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_recv_in_order() {
        let (tx, mut rx) = Pipe::bounded(4);
        for i in 0..4 {
            tx.send(i).await.unwrap();
        }
        for i in 0..4 {
            assert_eq!(rx.recv().await, Some(i));
        }
    }

    #[tokio::test]
    async fn test_recv_none_after_sender_drop() {
        let (tx, mut rx) = Pipe::bounded(2);
        tx.send(1u8).await.unwrap();
        drop(tx);
        assert_eq!(rx.recv().await, Some(1));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_send_fails_after_receiver_drop() {
        let (tx, rx) = Pipe::handoff();
        drop(rx);
        assert!(tx.is_closed());
        assert_eq!(tx.send(1u8).await, Err(Error::Closed));
    }

    #[tokio::test]
    async fn test_try_send_full_and_closed() {
        let (tx, rx) = Pipe::handoff();
        tx.try_send(1u8).unwrap();
        assert_eq!(tx.try_send(2), Err(Error::Full));
        drop(rx);
        assert_eq!(tx.try_send(3), Err(Error::Closed));
    }

    #[tokio::test]
    async fn test_close_refuses_new_sends_but_drains() {
        let (tx, mut rx) = Pipe::bounded(4);
        tx.send(1u8).await.unwrap();
        tx.send(2).await.unwrap();
        rx.close();
        assert_eq!(tx.try_send(3), Err(Error::Closed));
        assert_eq!(rx.recv().await, Some(1));
        assert_eq!(rx.recv().await, Some(2));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_collect_drains_to_close() {
        let (tx, rx) = Pipe::bounded(8);
        for i in 0..5 {
            tx.send(i).await.unwrap();
        }
        drop(tx);
        assert_eq!(rx.collect().await, vec![0, 1, 2, 3, 4]);
    }
}
