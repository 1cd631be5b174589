//! 1:1 transform stages.

use std::time::Duration;

use crate::pipe::{Pipe, Receiver};
use crate::token::CancelToken;

/// Apply `f` to every value of `input`, preserving order.
///
/// This is the template for any 1:1 transform: cancellation is checked
/// before pulling the next value and again before delivering the result. An
/// application already in progress runs to completion, but its result is
/// dropped rather than force-delivered if the token closed meanwhile.
pub fn map<T, U, F>(token: &CancelToken, mut input: Receiver<T>, mut f: F) -> Receiver<U>
where
    T: Send + 'static,
    U: Send + 'static,
    F: FnMut(T) -> U + Send + 'static,
{
    let (tx, rx) = Pipe::handoff();
    let token = token.clone();
    tokio::spawn(async move {
        tracing::debug!("map: stage started");
        loop {
            let value = tokio::select! {
                biased;
                _ = token.cancelled() => {
                    tracing::debug!("map: cancelled");
                    break;
                }
                value = input.recv() => match value {
                    Some(value) => value,
                    None => {
                        tracing::debug!("map: upstream closed");
                        break;
                    }
                },
            };
            let mapped = f(value);
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    tracing::debug!("map: cancelled, dropping in-flight result");
                    break;
                }
                sent = tx.send(mapped) => {
                    if sent.is_err() {
                        tracing::debug!("map: downstream disconnected");
                        break;
                    }
                }
            }
        }
        tracing::debug!("map: stage finished");
    });
    rx
}

/// Forward `input` unchanged, sleeping `delay` per element.
///
/// Simulates a slow (CPU- or IO-bound) per-element operation. The sleep is
/// deliberately not raced against the token: the current unit of work
/// finishes, then cancellation is honored before the next blocking step, so
/// a cancelled stage may complete one last delay but never delivers the
/// value it was working on.
pub fn heavy<T>(token: &CancelToken, mut input: Receiver<T>, delay: Duration) -> Receiver<T>
where
    T: Send + 'static,
{
    let (tx, rx) = Pipe::handoff();
    let token = token.clone();
    tokio::spawn(async move {
        tracing::debug!(?delay, "heavy: stage started");
        loop {
            let value = tokio::select! {
                biased;
                _ = token.cancelled() => {
                    tracing::debug!("heavy: cancelled");
                    break;
                }
                value = input.recv() => match value {
                    Some(value) => value,
                    None => {
                        tracing::debug!("heavy: upstream closed");
                        break;
                    }
                },
            };
            tokio::time::sleep(delay).await;
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    tracing::debug!("heavy: cancelled, dropping in-flight value");
                    break;
                }
                sent = tx.send(value) => {
                    if sent.is_err() {
                        tracing::debug!("heavy: downstream disconnected");
                        break;
                    }
                }
            }
        }
        tracing::debug!("heavy: stage finished");
    });
    rx
}
