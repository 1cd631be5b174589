//! Bounding stage: forward at most N values.

use crate::pipe::{Pipe, Receiver};
use crate::token::CancelToken;

/// Forward at most `n` values from `input`, then close the output.
///
/// If the input closes first, the output carries fewer than `n` values,
/// which is not an error. At most `n` values are ever pulled from upstream. Note
/// that `take` stops only its own stage: an unbounded upstream producer
/// keeps running until the shared token is cancelled.
pub fn take<T>(token: &CancelToken, mut input: Receiver<T>, n: usize) -> Receiver<T>
where
    T: Send + 'static,
{
    let (tx, rx) = Pipe::handoff();
    let token = token.clone();
    tokio::spawn(async move {
        tracing::debug!(n, "take: stage started");
        for taken in 0..n {
            let value = tokio::select! {
                biased;
                _ = token.cancelled() => {
                    tracing::debug!(taken, "take: cancelled");
                    break;
                }
                value = input.recv() => match value {
                    Some(value) => value,
                    None => {
                        tracing::debug!(taken, "take: upstream closed early");
                        break;
                    }
                },
            };
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    tracing::debug!(taken, "take: cancelled before delivery");
                    break;
                }
                sent = tx.send(value) => {
                    if sent.is_err() {
                        tracing::debug!(taken, "take: downstream disconnected");
                        break;
                    }
                }
            }
        }
        tracing::debug!("take: stage finished");
    });
    rx
}
