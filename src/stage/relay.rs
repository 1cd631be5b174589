//! Cancellation-aware relay.

use crate::pipe::{Pipe, Receiver};
use crate::token::CancelToken;

/// Relay `input` unchanged, racing every pull and every push against the
/// token.
///
/// The output yields the same values in the same order and stops
/// immediately once the token closes, whether the stage was waiting to
/// read the input or waiting to hand a value off. A value already pulled
/// but not yet delivered is dropped, never force-delivered. An input that
/// never produces cannot deadlock the relay: cancellation closes the output
/// regardless.
///
/// Cancellation is silent truncation, not an error.
pub fn or_done<T>(token: &CancelToken, mut input: Receiver<T>) -> Receiver<T>
where
    T: Send + 'static,
{
    let (tx, rx) = Pipe::handoff();
    let token = token.clone();
    tokio::spawn(async move {
        tracing::trace!("or_done: stage started");
        loop {
            let value = tokio::select! {
                biased;
                _ = token.cancelled() => {
                    tracing::trace!("or_done: cancelled while reading");
                    break;
                }
                value = input.recv() => match value {
                    Some(value) => value,
                    None => {
                        tracing::trace!("or_done: upstream closed");
                        break;
                    }
                },
            };
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    tracing::trace!("or_done: cancelled while delivering");
                    break;
                }
                sent = tx.send(value) => {
                    if sent.is_err() {
                        tracing::trace!("or_done: downstream disconnected");
                        break;
                    }
                }
            }
        }
        tracing::trace!("or_done: stage finished");
    });
    rx
}
