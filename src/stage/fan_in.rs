//! Fan-in stage merging many pipes into one.

use crate::pipe::{Pipe, Receiver, Sender};
use crate::token::CancelToken;

/// Merge `inputs` into a single output with no ordering guarantee across
/// inputs.
///
/// One relay worker runs per input, draining it completely and forwarding
/// every value with the same cancellation discipline as
/// [`or_done`](crate::stage::or_done). Interleaving depends on relative
/// producer speed and scheduling, so it is explicitly non-deterministic.
/// The merged output closes only once every worker has finished (a
/// supervisor task awaits all workers and holds the last sender until
/// then), so the output can never close while an input could still produce.
///
/// An empty `inputs` yields an immediately closed output.
pub fn fan_in_unordered<T>(token: &CancelToken, inputs: Vec<Receiver<T>>) -> Receiver<T>
where
    T: Send + 'static,
{
    let (tx, rx) = Pipe::handoff();
    let mut workers = Vec::with_capacity(inputs.len());
    for (index, input) in inputs.into_iter().enumerate() {
        let token = token.clone();
        let tx = tx.clone();
        workers.push(tokio::spawn(relay_input(index, token, input, tx)));
    }

    tokio::spawn(async move {
        tracing::debug!(workers = workers.len(), "fan_in: stage started");
        // Barrier: the output stays open until every worker has finished.
        for worker in workers {
            let _ = worker.await;
        }
        drop(tx);
        tracing::debug!("fan_in: all workers finished, output closed");
    });
    rx
}

/// Drain one input into the shared output.
async fn relay_input<T>(index: usize, token: CancelToken, mut input: Receiver<T>, tx: Sender<T>)
where
    T: Send + 'static,
{
    loop {
        let value = tokio::select! {
            biased;
            _ = token.cancelled() => break,
            value = input.recv() => match value {
                Some(value) => value,
                None => break,
            },
        };
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            sent = tx.send(value) => {
                if sent.is_err() {
                    break;
                }
            }
        }
    }
    tracing::debug!(index, "fan_in: worker finished");
}
