//! Flattening stage: a pipe of pipes into one pipe.

use crate::pipe::{Pipe, Receiver};
use crate::stage::or_done;
use crate::token::CancelToken;

/// Flatten a stream of streams into a single sequence.
///
/// Each inner stream is drained completely (through the cancellation-aware
/// relay) before the next one is pulled, so the order of outer arrival
/// determines the order of values in the flattened output; only the timing
/// within an inner stream is scheduling-dependent. Cancellation aborts both
/// the wait for the next inner stream and the drain of the current one.
pub fn bridge<T>(token: &CancelToken, mut inputs: Receiver<Receiver<T>>) -> Receiver<T>
where
    T: Send + 'static,
{
    let (tx, rx) = Pipe::handoff();
    let token = token.clone();
    tokio::spawn(async move {
        tracing::debug!("bridge: stage started");
        'outer: loop {
            let inner = tokio::select! {
                biased;
                _ = token.cancelled() => {
                    tracing::debug!("bridge: cancelled while waiting for next stream");
                    break;
                }
                inner = inputs.recv() => match inner {
                    Some(inner) => inner,
                    None => {
                        tracing::debug!("bridge: outer stream closed");
                        break;
                    }
                },
            };
            let mut inner = or_done(&token, inner);
            while let Some(value) = inner.recv().await {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        tracing::debug!("bridge: cancelled while draining");
                        break 'outer;
                    }
                    sent = tx.send(value) => {
                        if sent.is_err() {
                            tracing::debug!("bridge: downstream disconnected");
                            break 'outer;
                        }
                    }
                }
            }
        }
        tracing::debug!("bridge: stage finished");
    });
    rx
}
