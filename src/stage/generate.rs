//! Source stages producing values until told to stop.

use crate::pipe::{Pipe, Receiver};
use crate::token::CancelToken;

/// Cycle through `values` in order, forever, restarting after the last
/// element. Cancellation (or downstream disconnect) is the only way the
/// sequence ends; an empty `values` closes the output immediately instead
/// of spinning.
///
/// # Example
///
/// ```rust,ignore
/// use weir::prelude::*;
///
/// let token = CancelToken::new();
/// let ones_and_twos = repeat(&token, vec![1, 2]);
/// let six = take(&token, ones_and_twos, 6).collect().await;
/// assert_eq!(six, vec![1, 2, 1, 2, 1, 2]);
/// ```
pub fn repeat<T>(token: &CancelToken, values: Vec<T>) -> Receiver<T>
where
    T: Clone + Send + Sync + 'static,
{
    let (tx, rx) = Pipe::handoff();
    let token = token.clone();
    tokio::spawn(async move {
        tracing::debug!(count = values.len(), "repeat: stage started");
        if values.is_empty() {
            tracing::debug!("repeat: nothing to emit, closing output");
            return;
        }
        'cycle: loop {
            for value in &values {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        tracing::debug!("repeat: cancelled");
                        break 'cycle;
                    }
                    sent = tx.send(value.clone()) => {
                        if sent.is_err() {
                            tracing::debug!("repeat: downstream disconnected");
                            break 'cycle;
                        }
                    }
                }
            }
        }
        tracing::debug!("repeat: stage finished");
    });
    rx
}

/// Emit the result of calling `f` once per element, forever.
///
/// The callback may be stateful or non-deterministic (a counter, a random
/// source). As with [`repeat`], cancellation cannot be missed while blocked
/// on a consumer that will never read again: the send and the token are
/// raced in a single select, and a value produced but not delivered when
/// the race is lost is simply dropped.
pub fn repeat_fn<T, F>(token: &CancelToken, mut f: F) -> Receiver<T>
where
    T: Send + 'static,
    F: FnMut() -> T + Send + 'static,
{
    let (tx, rx) = Pipe::handoff();
    let token = token.clone();
    tokio::spawn(async move {
        tracing::debug!("repeat_fn: stage started");
        loop {
            let value = f();
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    tracing::debug!("repeat_fn: cancelled");
                    break;
                }
                sent = tx.send(value) => {
                    if sent.is_err() {
                        tracing::debug!("repeat_fn: downstream disconnected");
                        break;
                    }
                }
            }
        }
        tracing::debug!("repeat_fn: stage finished");
    });
    rx
}
