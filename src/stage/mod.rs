//! Pipeline stages: concurrent workers connected by pipes.
//!
//! Each combinator in this module spawns one or more tokio tasks
//! immediately and returns the receiving handle(s) of its output pipe(s).
//! Every blocking step inside a stage (pulling from upstream, pushing
//! downstream, waiting on the fan-in barrier) is raced against the shared
//! [`CancelToken`](crate::token::CancelToken), so a stage observes
//! cancellation within one blocking step and unwinds, closing its output by
//! dropping the owned sender. The races are biased toward the token, so
//! once `cancel` has returned no stage emits another value.
//!
//! Stages terminate on any of: token closed, upstream exhausted, downstream
//! disconnected, or a bounding condition ([`take`]) reached. Closing the
//! token is the caller's job and the only way to stop an unbounded producer
//! that is still connected.

mod bridge;
mod fan_in;
mod generate;
mod relay;
mod take;
mod tee;
mod transform;

pub use bridge::bridge;
pub use fan_in::fan_in_unordered;
pub use generate::{repeat, repeat_fn};
pub use relay::or_done;
pub use take::take;
pub use tee::tee;
pub use transform::{heavy, map};
