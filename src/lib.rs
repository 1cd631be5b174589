//! # Weir
//!
//! Composable, cancellable stream-processing stages.
//!
//! Weir provides small building blocks for unidirectional data pipelines:
//! each stage runs as an independent tokio task and forwards values through
//! bounded pipes until its upstream closes, its downstream disconnects, or
//! the shared [`CancelToken`] tells it to stop.
//!
//! ## Features
//!
//! - **Cooperative cancellation**: every blocking step races against a
//!   broadcast one-shot token; stages unwind within one blocking step
//! - **Structural cleanup**: a stage's output closes when the stage exits,
//!   on every exit path, because the stage owns the sender
//! - **Composable stages**: generators, 1:1 transforms, bounding, fan-in,
//!   duplication, and flattening of stream-of-streams
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use weir::prelude::*;
//! use std::time::Duration;
//!
//! let token = CancelToken::new();
//!
//! // An unbounded 1,2,1,2,... source, slowed down and capped at six values.
//! let source = repeat(&token, vec![1, 2]);
//! let slowed = heavy(&token, source, Duration::from_millis(100));
//! let capped = take(&token, slowed, 6);
//!
//! assert_eq!(capped.collect().await, vec![1, 2, 1, 2, 1, 2]);
//!
//! // Stop the still-running repeat stage.
//! token.cancel();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod pipe;
pub mod stage;
pub mod token;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::pipe::{Pipe, Receiver, Sender};
    pub use crate::stage::{
        bridge, fan_in_unordered, heavy, map, or_done, repeat, repeat_fn, take, tee,
    };
    pub use crate::token::CancelToken;
}

pub use error::{Error, Result};
pub use token::CancelToken;
