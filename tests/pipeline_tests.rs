//! Integration tests composing whole pipelines from Weir stages.

use std::collections::HashMap;
use std::time::Duration;

use weir::pipe::{Pipe, Receiver};
use weir::prelude::*;

/// Install a subscriber so stage lifecycle logs are visible under
/// `RUST_LOG=weir=debug`. First caller wins; the rest are no-ops.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// The canonical scenario: an unbounded 1,2 cycle capped at six values.
#[tokio::test]
async fn test_repeat_take_pipeline() {
    init_tracing();
    let token = CancelToken::new();

    let source = repeat(&token, vec![1, 2]);
    let out = take(&token, source, 6).collect().await;
    assert_eq!(out, vec![1, 2, 1, 2, 1, 2]);

    token.cancel();
}

/// A slow transform in the middle does not change values or order.
#[tokio::test]
async fn test_repeat_heavy_take_pipeline() {
    init_tracing();
    let token = CancelToken::new();

    let source = repeat(&token, vec![1, 2]);
    let slowed = heavy(&token, source, Duration::from_millis(2));
    let out = take(&token, slowed, 6).collect().await;
    assert_eq!(out, vec![1, 2, 1, 2, 1, 2]);

    token.cancel();
}

/// Fan-out to parallel heavy workers, fan the results back in: the merged
/// output must carry exactly the values the workers forwarded, in some
/// interleaving.
#[tokio::test]
async fn test_fan_out_fan_in_pipeline() {
    init_tracing();
    let token = CancelToken::new();

    // Four workers, each bounded to its own three-value slice.
    let workers: Vec<Receiver<u32>> = (0..4)
        .map(|_| take(&token, repeat(&token, vec![1u32, 2]), 3))
        .collect();

    let merged = fan_in_unordered(&token, workers).collect().await;
    assert_eq!(merged.len(), 12);
    let counts = merged.iter().fold(HashMap::new(), |mut acc, v| {
        *acc.entry(*v).or_insert(0u32) += 1;
        acc
    });
    // Each worker contributed [1, 2, 1].
    assert_eq!(counts.get(&1), Some(&8));
    assert_eq!(counts.get(&2), Some(&4));

    token.cancel();
}

/// A stateful random source through repeat_fn, bounded by take.
#[tokio::test]
async fn test_repeat_fn_random_source() {
    init_tracing();
    let token = CancelToken::new();

    let source = repeat_fn(&token, || rand::random::<u8>() as u32 % 10);
    let out = take(&token, source, 20).collect().await;

    assert_eq!(out.len(), 20);
    assert!(out.iter().all(|v| *v < 10));

    token.cancel();
}

/// Map applies its transform to every element in order through a pipeline.
#[tokio::test]
async fn test_map_in_pipeline() {
    init_tracing();
    let token = CancelToken::new();

    let source = repeat(&token, vec![1u32, 2, 3]);
    let squared = map(&token, source, |v| v * v);
    let out = take(&token, squared, 6).collect().await;
    assert_eq!(out, vec![1, 4, 9, 1, 4, 9]);

    token.cancel();
}

/// Tee feeds two independent consumers the same sequence.
#[tokio::test]
async fn test_tee_two_consumers() {
    init_tracing();
    let token = CancelToken::new();

    let source = take(&token, repeat(&token, vec![10u32, 20, 30]), 6);
    let (left, right) = tee(&token, source);

    let (left_seen, right_seen) = tokio::join!(left.collect(), right.collect());
    assert_eq!(left_seen, vec![10, 20, 30, 10, 20, 30]);
    assert_eq!(right_seen, left_seen);

    token.cancel();
}

/// Bridge flattens dynamically produced inner streams in outer order.
#[tokio::test]
async fn test_bridge_over_generated_streams() {
    init_tracing();
    let token = CancelToken::new();

    let (outer_tx, outer_rx) = Pipe::bounded(4);
    let flat = bridge(&token, outer_rx);

    let feeder_token = token.clone();
    tokio::spawn(async move {
        for i in 0..3u32 {
            let inner = take(&feeder_token, repeat(&feeder_token, vec![i]), 2);
            if outer_tx.send(inner).await.is_err() {
                break;
            }
        }
    });

    let out = flat.collect().await;
    assert_eq!(out, vec![0, 0, 1, 1, 2, 2]);

    token.cancel();
}

/// The end-to-end kitchen sink: generate, transform, duplicate, merge.
#[tokio::test]
async fn test_composed_pipeline() {
    init_tracing();
    let token = CancelToken::new();

    let source = take(&token, repeat(&token, vec![1u32, 2]), 4);
    let (a, b) = tee(&token, source);
    let a = map(&token, a, |v| v * 10);
    let merged = fan_in_unordered(&token, vec![a, b]);
    let mut out = merged.collect().await;
    out.sort_unstable();
    assert_eq!(out, vec![1, 1, 2, 2, 10, 10, 20, 20]);

    token.cancel();
}
