//! Duplication stage: one input, two synchronized outputs.

use crate::error::Result;
use crate::pipe::{Pipe, Receiver, SendPermit, Sender};
use crate::stage::or_done;
use crate::token::CancelToken;

/// Split `input` into two outputs that each receive every value.
///
/// The two deliveries for a given value are unordered relative to each
/// other (whichever output has capacity first is served first), but both
/// complete before the next value is pulled from upstream. An output that
/// has taken the current value is not offered it again (its send candidacy
/// is cleared for the rest of the iteration).
///
/// Cancellation aborts mid-delivery: the token closing between the two
/// deliveries can leave one output a single value ahead of the other. That
/// truncation is expected behavior, not a fault.
///
/// If one output's receiver is dropped, the stage keeps serving the other;
/// it exits once both are gone.
pub fn tee<T>(token: &CancelToken, input: Receiver<T>) -> (Receiver<T>, Receiver<T>)
where
    T: Clone + Send + 'static,
{
    let (tx1, rx1) = Pipe::handoff();
    let (tx2, rx2) = Pipe::handoff();
    let mut input = or_done(token, input);
    let token = token.clone();
    tokio::spawn(async move {
        tracing::debug!("tee: stage started");
        'next_value: while let Some(value) = input.recv().await {
            // Send candidacy for this iteration; cleared per output once it
            // has taken the value (or turned out to be disconnected).
            let mut first = (!tx1.is_closed()).then_some(&tx1);
            let mut second = (!tx2.is_closed()).then_some(&tx2);
            if first.is_none() && second.is_none() {
                tracing::debug!("tee: both outputs disconnected");
                break;
            }
            while first.is_some() || second.is_some() {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        tracing::debug!("tee: cancelled mid-delivery");
                        break 'next_value;
                    }
                    permit = reserve_candidate(first) => {
                        if let Ok(permit) = permit {
                            permit.send(value.clone());
                        }
                        first = None;
                    }
                    permit = reserve_candidate(second) => {
                        if let Ok(permit) = permit {
                            permit.send(value.clone());
                        }
                        second = None;
                    }
                }
            }
        }
        tracing::debug!("tee: stage finished");
    });
    (rx1, rx2)
}

/// Reserve a slot on a candidate output, or wait forever if the output has
/// already taken the current value.
async fn reserve_candidate<T>(candidate: Option<&Sender<T>>) -> Result<SendPermit<'_, T>> {
    match candidate {
        Some(sender) => sender.reserve().await,
        None => std::future::pending().await,
    }
}
